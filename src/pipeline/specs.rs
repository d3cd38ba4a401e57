// src/pipeline/specs.rs

use crate::diagnostics::{DiagnosticEvent, Diagnostics};
use crate::errors::PipelineError;
use crate::extract::{parse_spec_sheet, SpecSheet};
use crate::pipeline::pacing::{PacingPolicy, Sleeper};
use crate::pipeline::renderer::{Renderer, RendererGuard};
use rand::Rng;

/// Visits listing detail pages and reads their specification card.
pub struct SpecSheetDriver<'d, S: Sleeper, G: Rng> {
    pacing: PacingPolicy,
    sleeper: S,
    rng: G,
    diag: &'d dyn Diagnostics,
}

impl<'d, S: Sleeper, G: Rng> SpecSheetDriver<'d, S, G> {
    pub fn new(pacing: PacingPolicy, sleeper: S, rng: G, diag: &'d dyn Diagnostics) -> Self {
        Self {
            pacing,
            sleeper,
            rng,
            diag,
        }
    }

    /// One sheet per link that rendered and carried a card, in link order.
    /// Links that fail are skipped. Closes the renderer before returning.
    pub fn run<R: Renderer>(&mut self, renderer: R, links: &[String]) -> Result<Vec<SpecSheet>, PipelineError> {
        let mut guard = RendererGuard::new(renderer, self.diag);
        let mut sheets = Vec::new();

        for (i, url) in links.iter().enumerate() {
            match guard.get().render(url) {
                Ok(snapshot) => match parse_spec_sheet(url, &snapshot.html) {
                    Some(sheet) => {
                        self.diag.event(DiagnosticEvent::SpecSheetParsed {
                            url: url.clone(),
                            entries: sheet.entries.len(),
                        });
                        sheets.push(sheet);
                    }
                    None => self.diag.event(DiagnosticEvent::SpecSheetFailed {
                        url: url.clone(),
                        reason: "no specification card on page".to_string(),
                    }),
                },
                Err(e) => self.diag.event(DiagnosticEvent::SpecSheetFailed {
                    url: url.clone(),
                    reason: e.to_string(),
                }),
            }

            if i + 1 < links.len() {
                let delay = self.pacing.next_delay(&mut self.rng);
                self.sleeper.sleep(delay);
            }
        }

        guard.close()?;
        Ok(sheets)
    }
}
