// src/pipeline/driver.rs

use crate::diagnostics::{DiagnosticEvent, Diagnostics};
use crate::domain::ListingRecord;
use crate::errors::{PipelineError, RendererError};
use crate::extract::{parse_page, LISTING_CONTAINER_CSS};
use crate::pipeline::pacing::{PacingPolicy, Sleeper};
use crate::pipeline::renderer::{Renderer, RendererGuard};
use rand::Rng;
use std::fmt;
use std::time::Duration;

pub const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

#[derive(Debug, Clone)]
pub struct DriverSettings {
    /// Search URL with a `{page}` placeholder.
    pub search_url: String,
    /// Origin prepended to relative listing links.
    pub base_origin: String,
    pub wait_timeout: Duration,
    /// Pause after scrolling so lazy content can land.
    pub settle: Duration,
    pub pacing: PacingPolicy,
}

impl DriverSettings {
    pub fn page_url(&self, page: u32) -> String {
        self.search_url.replace("{page}", &page.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFailureKind {
    /// The listing container never showed up.
    Timeout,
    Renderer(String),
}

impl fmt::Display for PageFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageFailureKind::Timeout => write!(f, "timed out waiting for listings"),
            PageFailureKind::Renderer(msg) => write!(f, "{msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page: u32,
    pub url: String,
    pub kind: PageFailureKind,
}

/// Everything one run produced: records in page order, then in-page order,
/// plus the pages that gave nothing because they failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeRun {
    pub records: Vec<ListingRecord>,
    pub failures: Vec<PageFailure>,
    pub pages_requested: u32,
}

pub struct PaginationDriver<'d, S: Sleeper, G: Rng> {
    settings: DriverSettings,
    sleeper: S,
    rng: G,
    diag: &'d dyn Diagnostics,
}

impl<'d, S: Sleeper, G: Rng> PaginationDriver<'d, S, G> {
    pub fn new(settings: DriverSettings, sleeper: S, rng: G, diag: &'d dyn Diagnostics) -> Self {
        Self {
            settings,
            sleeper,
            rng,
            diag,
        }
    }

    /// Fetches pages `1..=num_pages` one after another through `renderer`.
    ///
    /// A failed page contributes no records and is listed in
    /// `ScrapeRun::failures`; the run carries on. The renderer is closed
    /// before returning on every path. Failing to close it is the only error.
    pub fn run<R: Renderer>(&mut self, renderer: R, num_pages: u32) -> Result<ScrapeRun, PipelineError> {
        let mut guard = RendererGuard::new(renderer, self.diag);
        let mut run = ScrapeRun {
            pages_requested: num_pages,
            ..ScrapeRun::default()
        };

        for page in 1..=num_pages {
            let url = self.settings.page_url(page);
            self.diag.event(DiagnosticEvent::PageRequested {
                page,
                url: url.clone(),
            });

            match self.scrape_page(guard.get(), &url) {
                Ok(records) => {
                    self.diag.event(DiagnosticEvent::PageParsed {
                        page,
                        url: url.clone(),
                        records: records.len(),
                    });
                    run.records.extend(records);
                }
                Err(kind) => {
                    self.diag.event(DiagnosticEvent::PageFailed {
                        page,
                        url: url.clone(),
                        reason: kind.to_string(),
                    });
                    run.failures.push(PageFailure { page, url, kind });
                }
            }

            if page < num_pages {
                let delay = self.settings.pacing.next_delay(&mut self.rng);
                self.diag.event(DiagnosticEvent::PacingDelay {
                    after_page: page,
                    delay,
                });
                self.sleeper.sleep(delay);
            }
        }

        guard.close()?;
        Ok(run)
    }

    fn scrape_page<R: Renderer>(&mut self, renderer: &mut R, url: &str) -> Result<Vec<ListingRecord>, PageFailureKind> {
        let renderer_err = |e: RendererError| PageFailureKind::Renderer(e.to_string());

        renderer.render(url).map_err(renderer_err)?;

        let appeared = renderer
            .wait_for_element(LISTING_CONTAINER_CSS, self.settings.wait_timeout)
            .map_err(renderer_err)?;
        if !appeared {
            return Err(PageFailureKind::Timeout);
        }

        renderer.execute_script(SCROLL_TO_BOTTOM).map_err(renderer_err)?;
        if !self.settings.settle.is_zero() {
            self.sleeper.sleep(self.settings.settle);
        }

        let snapshot = renderer.snapshot().map_err(renderer_err)?;
        Ok(parse_page(&snapshot.html, &self.settings.base_origin, self.diag))
    }
}
