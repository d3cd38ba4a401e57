// src/extract/record.rs

use crate::diagnostics::{DiagnosticEvent, Diagnostics};
use crate::domain::ListingRecord;
use crate::extract::field::{extract_attr, extract_text, Locator};
use scraper::ElementRef;

pub const TITLE: Locator = Locator::class("span", "result-title");
pub const PRICE: Locator = Locator::class("span", "price-amount");
pub const LOCATION: Locator = Locator::class("span", "proximity-text");
pub const MILEAGE: Locator = Locator::class("span", "odometer-proximity");
pub const DEALER: Locator = Locator::class("div", "seller-name");
pub const IMAGE: Locator = Locator::class("img", "photo-image");
pub const DETAIL: Locator = Locator::class("p", "details used");
pub const PRICE_DELTA: Locator = Locator::id_suffix("p", "_DeltaPrice");
pub const LINK: Locator = Locator::class("a", "inner-link");

/// Absolute link for a listing: `base_origin` + `href`, with any query
/// string dropped.
pub fn resolve_link(base_origin: &str, href: &str) -> String {
    let joined = format!("{base_origin}{href}");
    match joined.split_once('?') {
        Some((path, _query)) => path.to_string(),
        None => joined,
    }
}

/// Builds one record from one listing fragment. `index` is the fragment's
/// position on its page and only feeds diagnostics.
pub fn build_record(
    fragment: ElementRef<'_>,
    base_origin: &str,
    index: usize,
    diag: &dyn Diagnostics,
) -> ListingRecord {
    let price_delta = extract_text(fragment, &PRICE_DELTA);
    diag.event(DiagnosticEvent::PriceDeltaFound {
        index,
        found: price_delta.is_some(),
    });

    ListingRecord {
        title: extract_text(fragment, &TITLE),
        price: extract_text(fragment, &PRICE),
        location: extract_text(fragment, &LOCATION),
        mileage: extract_text(fragment, &MILEAGE),
        dealer: extract_text(fragment, &DEALER),
        image_url: extract_attr(fragment, &IMAGE, "src"),
        detail: extract_text(fragment, &DETAIL),
        price_delta,
        link_url: extract_attr(fragment, &LINK, "href").map(|href| resolve_link(base_origin, &href)),
    }
}
