// src/extract/page.rs

use crate::diagnostics::Diagnostics;
use crate::domain::ListingRecord;
use crate::extract::field::{find_all, Locator};
use crate::extract::record::build_record;
use scraper::Html;

/// Wrapper around a single listing on a results page.
pub const LISTING_CONTAINER: Locator = Locator::class("div", "result-item-inner");

/// CSS form of `LISTING_CONTAINER`, for renderers that wait on a selector.
pub const LISTING_CONTAINER_CSS: &str = "div.result-item-inner";

/// One record per listing container, in document order. A page without any
/// container gives an empty list.
pub fn parse_page(html: &str, base_origin: &str, diag: &dyn Diagnostics) -> Vec<ListingRecord> {
    let document = Html::parse_document(html);

    find_all(document.root_element(), &LISTING_CONTAINER)
        .enumerate()
        .map(|(index, fragment)| build_record(fragment, base_origin, index, diag))
        .collect()
}
