// src/domain/filter.rs

use crate::domain::listing::NormalizedRecord;

/// Keeps listings discounted by at least `threshold`, in scrape order.
pub fn filter_below_market(records: Vec<NormalizedRecord>, threshold: u64) -> Vec<NormalizedRecord> {
    records
        .into_iter()
        .filter(|r| r.price_delta_amount >= threshold)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Plain-text email: a header line, then one block per listing separated by
/// a blank line.
pub fn compose_notification(
    subject: &str,
    matches: &[NormalizedRecord],
    threshold: u64,
) -> Notification {
    let mut body = format!(
        "Here are the cars that are ${} or more below market price:\n\n",
        group_thousands(threshold)
    );

    for record in matches {
        let l = &record.listing;
        let line = |label: &str, value: &Option<String>| {
            format!("{label}: {}\n", value.as_deref().unwrap_or("N/A"))
        };
        body.push_str(&line("Title", &l.title));
        body.push_str(&line("Price", &l.price));
        body.push_str(&line("Price Below Market", &l.price_delta));
        body.push_str(&line("Location", &l.location));
        body.push_str(&line("Mileage", &l.mileage));
        body.push_str(&line("Dealer", &l.dealer));
        body.push_str(&line("URL", &l.link_url));
        body.push('\n');
    }

    Notification {
        subject: subject.to_string(),
        body,
    }
}

/// 3000 -> "3,000"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
