pub mod driver;
pub mod http_renderer;
pub mod pacing;
pub mod renderer;
pub mod specs;

pub use driver::{DriverSettings, PageFailure, PageFailureKind, PaginationDriver, ScrapeRun};
pub use http_renderer::HttpRenderer;
pub use pacing::{PacingPolicy, Sleeper, ThreadSleeper};
pub use renderer::{DocumentSnapshot, Renderer};
pub use specs::SpecSheetDriver;
