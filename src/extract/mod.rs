pub mod field;
pub mod page;
pub mod record;
pub mod specs;

pub use page::{parse_page, LISTING_CONTAINER_CSS};
pub use record::resolve_link;
pub use specs::{parse_spec_sheet, SpecEntry, SpecSheet};
