// src/domain/normalize.rs

use crate::diagnostics::{DiagnosticEvent, Diagnostics};
use crate::domain::listing::{ListingRecord, NormalizedRecord};

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Reads the "below market" badge text as a whole currency amount.
///
/// Currency symbols and thousands separators are dropped first, then the
/// first run of digits is taken. Anything unreadable counts as 0, so this
/// never fails.
pub fn price_delta_amount(raw: Option<&str>, diag: &dyn Diagnostics) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',')
        .collect();

    let digits: String = cleaned
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        if !raw.trim().is_empty() {
            diag.event(DiagnosticEvent::PriceDeltaUnparsed {
                raw: raw.to_string(),
                reason: "no numeric value".to_string(),
            });
        }
        return 0;
    }

    match digits.parse::<u64>() {
        Ok(amount) => amount,
        Err(e) => {
            diag.event(DiagnosticEvent::PriceDeltaUnparsed {
                raw: raw.to_string(),
                reason: e.to_string(),
            });
            0
        }
    }
}

pub fn normalize(listing: ListingRecord, diag: &dyn Diagnostics) -> NormalizedRecord {
    let price_delta_amount = price_delta_amount(listing.price_delta.as_deref(), diag);
    NormalizedRecord {
        listing,
        price_delta_amount,
    }
}

pub fn normalize_all(listings: Vec<ListingRecord>, diag: &dyn Diagnostics) -> Vec<NormalizedRecord> {
    listings.into_iter().map(|l| normalize(l, diag)).collect()
}
