// src/runner.rs
//
// One batch run: scrape -> normalize -> persist -> filter -> notify.
// Nothing carries over between runs except what the sinks wrote.

use crate::config::{Config, EmailConfig};
use crate::diagnostics::{DiagnosticEvent, Diagnostics};
use crate::domain::{compose_notification, filter_below_market, normalize_all, NormalizedRecord};
use crate::errors::PipelineError;
use crate::extract::SpecSheet;
use crate::mailer::NotificationSink;
use crate::persist::PersistenceSink;
use crate::pipeline::{PageFailure, PaginationDriver, Renderer, Sleeper, SpecSheetDriver};
use rand::Rng;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct RunReport {
    pub pages_requested: u32,
    pub failures: Vec<PageFailure>,
    pub records: Vec<NormalizedRecord>,
    pub matches: Vec<NormalizedRecord>,
    pub persisted: Vec<PathBuf>,
    pub notified: bool,
}

impl RunReport {
    pub fn pages_succeeded(&self) -> u32 {
        self.pages_requested - self.failures.len() as u32
    }

    /// Links of every scraped record that has one, in scrape order.
    pub fn links(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.listing.link_url.clone())
            .collect()
    }
}

/// Mail sink plus the addressing it needs.
pub struct Notifier<'a> {
    pub sink: &'a dyn NotificationSink,
    pub email: &'a EmailConfig,
}

pub fn run_once<R, S, G>(
    cfg: &Config,
    renderer: R,
    sleeper: S,
    rng: G,
    sinks: &[Box<dyn PersistenceSink>],
    notifier: Option<Notifier<'_>>,
    diag: &dyn Diagnostics,
) -> Result<RunReport, PipelineError>
where
    R: Renderer,
    S: Sleeper,
    G: Rng,
{
    let mut driver = PaginationDriver::new(cfg.driver_settings(), sleeper, rng, diag);
    let scrape = driver.run(renderer, cfg.num_pages)?;

    let records = normalize_all(scrape.records, diag);

    let mut persisted = Vec::new();
    for sink in sinks {
        match sink.persist(&records) {
            Ok(path) => {
                diag.event(DiagnosticEvent::Persisted {
                    sink: sink.name(),
                    path: path.clone(),
                });
                persisted.push(path);
            }
            Err(e) => diag.event(DiagnosticEvent::PersistFailed {
                sink: sink.name(),
                reason: e.to_string(),
            }),
        }
    }

    let matches = filter_below_market(records.clone(), cfg.threshold);
    diag.event(DiagnosticEvent::MatchesFiltered {
        total: records.len(),
        matches: matches.len(),
        threshold: cfg.threshold,
    });

    let notified = match notifier {
        Some(n) => send_matches(&n, &matches, cfg.threshold, diag),
        None => {
            diag.event(DiagnosticEvent::NotificationSkipped);
            false
        }
    };

    Ok(RunReport {
        pages_requested: scrape.pages_requested,
        failures: scrape.failures,
        records,
        matches,
        persisted,
        notified,
    })
}

fn send_matches(
    notifier: &Notifier<'_>,
    matches: &[NormalizedRecord],
    threshold: u64,
    diag: &dyn Diagnostics,
) -> bool {
    let email = notifier.email;
    let message = compose_notification(&email.subject, matches, threshold);

    match notifier
        .sink
        .send(&email.recipient, &message.subject, &message.body)
    {
        Ok(()) => {
            diag.event(DiagnosticEvent::NotificationSent {
                recipient: email.recipient.clone(),
                matches: matches.len(),
            });
            true
        }
        Err(e) => {
            diag.event(DiagnosticEvent::NotificationFailed {
                recipient: email.recipient.clone(),
                reason: e.to_string(),
            });
            false
        }
    }
}

/// Reads the specification card of each link, up to `limit` links.
pub fn run_spec_pass<R, S, G>(
    cfg: &Config,
    renderer: R,
    sleeper: S,
    rng: G,
    links: &[String],
    limit: Option<usize>,
    diag: &dyn Diagnostics,
) -> Result<Vec<SpecSheet>, PipelineError>
where
    R: Renderer,
    S: Sleeper,
    G: Rng,
{
    let take = limit.unwrap_or(links.len()).min(links.len());
    let mut driver = SpecSheetDriver::new(cfg.spec_pacing, sleeper, rng, diag);
    driver.run(renderer, &links[..take])
}
