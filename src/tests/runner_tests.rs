// src/tests/runner_tests.rs

use super::utils::{
    results_page, temp_path, FakePage, FakeRenderer, ListingHtml, MemoryDiagnostics,
    RecordingNotifier, RecordingSleeper,
};
use crate::config::{Config, EmailConfig};
use crate::diagnostics::DiagnosticEvent;
use crate::domain::NormalizedRecord;
use crate::errors::PipelineError;
use crate::persist::{load_json, JsonSink, PersistenceSink};
use crate::runner::{run_once, run_spec_pass, Notifier};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;

fn config(pages: u32) -> Config {
    Config {
        num_pages: pages,
        threshold: 3000,
        search_url: "https://www.autotrader.ca/cars/on/?pg={page}".to_string(),
        settle: Duration::ZERO,
        ..Config::default()
    }
}

fn email() -> EmailConfig {
    EmailConfig {
        recipient: "buyer@example.com".to_string(),
        subject: "Autotrader Data".to_string(),
        brevo_api_key: "test-key".to_string(),
        sender_email: "watch@example.com".to_string(),
        sender_name: "Watch".to_string(),
    }
}

fn two_pages(cfg: &Config) -> FakeRenderer {
    let settings = cfg.driver_settings();
    FakeRenderer::new(vec![
        (
            settings.page_url(1),
            FakePage::Html(results_page(&[
                ListingHtml::full("a", "Small discount", Some("$2,999 below market")),
                ListingHtml::full("b", "Big discount", Some("$8,250 below market")),
            ])),
        ),
        (
            settings.page_url(2),
            FakePage::Html(results_page(&[
                ListingHtml::full("c", "No badge", None),
                ListingHtml::full("d", "Exact", Some("$3,000 below market")),
            ])),
        ),
    ])
}

struct FailingSink;

impl PersistenceSink for FailingSink {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn persist(&self, _records: &[NormalizedRecord]) -> Result<PathBuf, PipelineError> {
        Err(PipelineError::Persist("disk full".into()))
    }
}

#[test]
fn run_once_persists_filters_and_notifies() {
    let cfg = config(2);
    let json_path = temp_path("runner_all", "json");
    let sinks: Vec<Box<dyn PersistenceSink>> = vec![Box::new(JsonSink::new(&json_path))];
    let notifier = RecordingNotifier::default();
    let email = email();
    let diag = MemoryDiagnostics::default();

    let report = run_once(
        &cfg,
        two_pages(&cfg),
        RecordingSleeper::default(),
        StdRng::seed_from_u64(11),
        &sinks,
        Some(Notifier {
            sink: &notifier,
            email: &email,
        }),
        &diag,
    )
    .unwrap();

    assert_eq!(report.records.len(), 4);
    assert!(report.failures.is_empty());

    let amounts: Vec<_> = report.records.iter().map(|r| r.price_delta_amount).collect();
    assert_eq!(amounts, [2999, 8250, 0, 3000]);

    let titles: Vec<_> = report
        .matches
        .iter()
        .map(|r| r.listing.title.clone().unwrap_or_default())
        .collect();
    assert_eq!(titles, ["Big discount", "Exact"]);

    assert_eq!(report.persisted, [json_path.clone()]);
    assert_eq!(load_json(&json_path).unwrap(), report.records);

    assert!(report.notified);
    let sent = notifier.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "buyer@example.com");
    assert!(sent[0].body.contains("Title: Big discount"));
    assert!(sent[0].body.contains("Title: Exact"));
    assert!(!sent[0].body.contains("Small discount"));

    let _ = std::fs::remove_file(&json_path);
}

#[test]
fn sink_failure_does_not_stop_the_run() {
    let cfg = config(2);
    let sinks: Vec<Box<dyn PersistenceSink>> = vec![Box::new(FailingSink)];
    let diag = MemoryDiagnostics::default();

    let report = run_once(
        &cfg,
        two_pages(&cfg),
        RecordingSleeper::default(),
        StdRng::seed_from_u64(1),
        &sinks,
        None,
        &diag,
    )
    .unwrap();

    assert!(report.persisted.is_empty());
    assert_eq!(report.matches.len(), 2);
    assert!(!report.notified);
    assert_eq!(
        diag.count(|e| matches!(e, DiagnosticEvent::PersistFailed { sink: "broken", .. })),
        1
    );
    assert_eq!(diag.count(|e| matches!(e, DiagnosticEvent::NotificationSkipped)), 1);
}

#[test]
fn notifier_failure_is_reported_not_raised() {
    let cfg = config(2);
    let notifier = RecordingNotifier {
        fail: true,
        ..RecordingNotifier::default()
    };
    let email = email();
    let diag = MemoryDiagnostics::default();

    let report = run_once(
        &cfg,
        two_pages(&cfg),
        RecordingSleeper::default(),
        StdRng::seed_from_u64(1),
        &[],
        Some(Notifier {
            sink: &notifier,
            email: &email,
        }),
        &diag,
    )
    .unwrap();

    assert!(!report.notified);
    assert_eq!(
        diag.count(|e| matches!(e, DiagnosticEvent::NotificationFailed { .. })),
        1
    );
}

#[test]
fn partial_run_still_reports_what_it_found() {
    let cfg = config(3);
    // Page 3 is unknown to the fake and fails.
    let diag = MemoryDiagnostics::default();

    let report = run_once(
        &cfg,
        two_pages(&cfg),
        RecordingSleeper::default(),
        StdRng::seed_from_u64(2),
        &[],
        None,
        &diag,
    )
    .unwrap();

    assert_eq!(report.pages_requested, 3);
    assert_eq!(report.pages_succeeded(), 2);
    assert_eq!(report.records.len(), 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].page, 3);
}

#[test]
fn spec_pass_respects_limit() {
    let cfg = config(1);
    let links: Vec<String> = (1..=3)
        .map(|i| format!("https://www.autotrader.ca/a/{i}"))
        .collect();
    let renderer = FakeRenderer::new(vec![]);
    let state = renderer.state.clone();
    let diag = MemoryDiagnostics::default();

    let sheets = run_spec_pass(
        &cfg,
        renderer,
        RecordingSleeper::default(),
        StdRng::seed_from_u64(3),
        &links,
        Some(2),
        &diag,
    )
    .unwrap();

    assert!(sheets.is_empty());
    assert_eq!(state.borrow().visited, links[..2].to_vec());
    assert_eq!(state.borrow().close_calls, 1);
}

#[test]
fn report_links_are_query_free() {
    let cfg = config(2);
    let diag = MemoryDiagnostics::default();

    let report = run_once(
        &cfg,
        two_pages(&cfg),
        RecordingSleeper::default(),
        StdRng::seed_from_u64(4),
        &[],
        None,
        &diag,
    )
    .unwrap();

    let links = report.links();
    assert_eq!(links.len(), 4);
    assert!(links.iter().all(|l| !l.contains('?')));
}
