// src/extract/specs.rs
//
// Detail pages carry a specification card:
//
// ul#sl-card-body
//  └── li
//       ├── span#spec-key-<n>     "Kilometres"
//       └── span#spec-value-<n>
//            └── strong           "45,000 km"

use crate::extract::field::{element_text, find, find_all, Locator};
use scraper::Html;
use serde::{Deserialize, Serialize};

const CARD_BODY: Locator = Locator::id("ul", "sl-card-body");
const ITEM: Locator = Locator::tag("li");
const KEY: Locator = Locator::id_prefix("span", "spec-key");
const VALUE: Locator = Locator::id_prefix("span", "spec-value");
const VALUE_TEXT: Locator = Locator::tag("strong");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecSheet {
    pub url: String,
    pub entries: Vec<SpecEntry>,
}

#[cfg(test)]
impl SpecSheet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}

/// `None` when the page has no specification card. Items lacking a key or a
/// value are skipped.
pub fn parse_spec_sheet(url: &str, html: &str) -> Option<SpecSheet> {
    let document = Html::parse_document(html);
    let card = find(document.root_element(), &CARD_BODY)?;

    let entries = find_all(card, &ITEM)
        .filter_map(|item| {
            let key = find(item, &KEY).map(element_text)?;
            let value = find(item, &VALUE)
                .and_then(|v| find(v, &VALUE_TEXT))
                .map(element_text)?;
            Some(SpecEntry { key, value })
        })
        .collect();

    Some(SpecSheet {
        url: url.to_string(),
        entries,
    })
}
