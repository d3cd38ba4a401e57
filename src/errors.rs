// errors.rs
use std::fmt;

/// Errors that end a run. Page- and field-level problems never surface here;
/// they are isolated inside the pipeline and reported as diagnostics.
#[derive(Debug)]
pub enum PipelineError {
    Renderer(String),
    Config(String),
    Persist(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Renderer(msg) => write!(f, "Renderer error: {msg}"),
            PipelineError::Config(msg) => write!(f, "Configuration error: {msg}"),
            PipelineError::Persist(msg) => write!(f, "Persistence error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

/// Errors raised by a `Renderer` implementation.
#[derive(Debug)]
pub enum RendererError {
    Launch(String),
    Navigation(String),
    Script(String),
    Closed,
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererError::Launch(msg) => write!(f, "Failed to start renderer: {msg}"),
            RendererError::Navigation(msg) => write!(f, "Navigation failed: {msg}"),
            RendererError::Script(msg) => write!(f, "Script failed: {msg}"),
            RendererError::Closed => write!(f, "Renderer already closed"),
        }
    }
}

impl std::error::Error for RendererError {}

impl From<RendererError> for PipelineError {
    fn from(e: RendererError) -> Self {
        PipelineError::Renderer(e.to_string())
    }
}
