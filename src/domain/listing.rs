// src/domain/listing.rs
use serde::{Deserialize, Serialize};

/// Field names in the order every export writes them.
/// JSON keys and spreadsheet headers both come from this list.
pub const RECORD_COLUMNS: [&str; 10] = [
    "title",
    "price",
    "location",
    "mileage",
    "dealer",
    "image_url",
    "detail",
    "price_delta",
    "link_url",
    "price_delta_amount",
];

/// One vehicle listing as scraped from a results page.
/// Every field is optional; absence means the markup did not carry it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    // Always serialized, `null` when the badge was missing.
    #[serde(default)]
    pub price_delta: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

impl ListingRecord {
    /// Value of a field by its column name; `None` for unknown names too.
    pub fn field(&self, column: &str) -> Option<&str> {
        let value = match column {
            "title" => &self.title,
            "price" => &self.price,
            "location" => &self.location,
            "mileage" => &self.mileage,
            "dealer" => &self.dealer,
            "image_url" => &self.image_url,
            "detail" => &self.detail,
            "price_delta" => &self.price_delta,
            "link_url" => &self.link_url,
            _ => return None,
        };
        value.as_deref()
    }
}

/// A listing plus the discount parsed out of `price_delta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    #[serde(flatten)]
    pub listing: ListingRecord,
    pub price_delta_amount: u64,
}
