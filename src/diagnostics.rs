// src/diagnostics.rs
//
// Components report what happened through a `Diagnostics` handle instead of
// logging globally. Production forwards to `tracing`; tests record events.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    PageRequested { page: u32, url: String },
    PageParsed { page: u32, url: String, records: usize },
    PageFailed { page: u32, url: String, reason: String },
    PacingDelay { after_page: u32, delay: Duration },
    PriceDeltaFound { index: usize, found: bool },
    PriceDeltaUnparsed { raw: String, reason: String },
    SpecSheetParsed { url: String, entries: usize },
    SpecSheetFailed { url: String, reason: String },
    RendererClosed,
    RendererCloseFailed { reason: String },
    Persisted { sink: &'static str, path: PathBuf },
    PersistFailed { sink: &'static str, reason: String },
    MatchesFiltered { total: usize, matches: usize, threshold: u64 },
    NotificationSent { recipient: String, matches: usize },
    NotificationFailed { recipient: String, reason: String },
    NotificationSkipped,
}

pub trait Diagnostics {
    fn event(&self, event: DiagnosticEvent);
}

/// Forwards every event to `tracing` at a level matching its severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn event(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::PageRequested { page, url } => {
                tracing::info!(page, %url, "Scraping page");
            }
            DiagnosticEvent::PageParsed { page, url, records } => {
                tracing::info!(page, %url, records, "Found {records} cars on page {page}");
            }
            DiagnosticEvent::PageFailed { page, url, reason } => {
                tracing::error!(page, %url, %reason, "Page yielded no records");
            }
            DiagnosticEvent::PacingDelay { after_page, delay } => {
                tracing::debug!(after_page, delay_ms = delay.as_millis() as u64, "Pacing");
            }
            DiagnosticEvent::PriceDeltaFound { index, found } => {
                tracing::debug!(index, found, "Price delta element lookup");
            }
            DiagnosticEvent::PriceDeltaUnparsed { raw, reason } => {
                tracing::warn!(%raw, %reason, "Could not read price delta, using 0");
            }
            DiagnosticEvent::SpecSheetParsed { url, entries } => {
                tracing::info!(%url, entries, "Specification sheet parsed");
            }
            DiagnosticEvent::SpecSheetFailed { url, reason } => {
                tracing::error!(%url, %reason, "Specification sheet skipped");
            }
            DiagnosticEvent::RendererClosed => tracing::debug!("Renderer closed"),
            DiagnosticEvent::Persisted { sink, path } => {
                tracing::info!(sink, path = %path.display(), "Data saved");
            }
            DiagnosticEvent::PersistFailed { sink, reason } => {
                tracing::error!(sink, %reason, "Failed to save data");
            }
            DiagnosticEvent::MatchesFiltered {
                total,
                matches,
                threshold,
            } => {
                tracing::info!(total, matches, threshold, "Total cars below market price: {matches}");
            }
            DiagnosticEvent::NotificationSent { recipient, matches } => {
                tracing::info!(%recipient, matches, "Email sent");
            }
            DiagnosticEvent::NotificationFailed { recipient, reason } => {
                tracing::error!(%recipient, %reason, "Email not sent");
            }
            DiagnosticEvent::NotificationSkipped => {
                tracing::warn!("No mail settings configured, skipping email");
            }
            DiagnosticEvent::RendererCloseFailed { reason } => {
                tracing::error!(%reason, "Renderer failed to close");
            }
        }
    }
}
