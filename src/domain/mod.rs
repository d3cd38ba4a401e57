pub mod filter;
pub mod listing;
pub mod normalize;

pub use filter::{compose_notification, filter_below_market, Notification};
pub use listing::{ListingRecord, NormalizedRecord, RECORD_COLUMNS};
pub use normalize::{normalize_all, price_delta_amount};
