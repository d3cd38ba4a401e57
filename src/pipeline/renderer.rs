// src/pipeline/renderer.rs

use crate::diagnostics::{DiagnosticEvent, Diagnostics};
use crate::errors::RendererError;
use std::time::Duration;

/// The rendered HTML of a page at the moment it was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub url: String,
    pub html: String,
}

/// A page renderer the pipeline drives one page at a time.
///
/// Implementations own whatever process or connection backs them and must
/// release it in `close`. The pipeline calls `close` exactly once per run.
pub trait Renderer {
    /// Load `url` and return the document as first rendered.
    fn render(&mut self, url: &str) -> Result<DocumentSnapshot, RendererError>;

    /// Wait up to `timeout` for `css` to match. `Ok(false)` means the wait ran out.
    fn wait_for_element(&mut self, css: &str, timeout: Duration) -> Result<bool, RendererError>;

    fn execute_script(&mut self, script: &str) -> Result<(), RendererError>;

    /// Capture the current document, including anything loaded since `render`.
    fn snapshot(&mut self) -> Result<DocumentSnapshot, RendererError>;

    fn close(&mut self) -> Result<(), RendererError>;
}

/// Closes the renderer when dropped unless `close` already ran, so a panic
/// mid-run still releases it.
pub struct RendererGuard<'d, R: Renderer> {
    renderer: R,
    closed: bool,
    diag: &'d dyn Diagnostics,
}

impl<'d, R: Renderer> RendererGuard<'d, R> {
    pub fn new(renderer: R, diag: &'d dyn Diagnostics) -> Self {
        Self {
            renderer,
            closed: false,
            diag,
        }
    }

    pub fn get(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn close(mut self) -> Result<(), RendererError> {
        self.close_inner()
    }

    fn close_inner(&mut self) -> Result<(), RendererError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.renderer.close();
        match &result {
            Ok(()) => self.diag.event(DiagnosticEvent::RendererClosed),
            Err(e) => self.diag.event(DiagnosticEvent::RendererCloseFailed {
                reason: e.to_string(),
            }),
        }
        result
    }
}

impl<R: Renderer> Drop for RendererGuard<'_, R> {
    fn drop(&mut self) {
        let _ = self.close_inner();
    }
}
