pub mod json;
pub mod xlsx;

use crate::domain::NormalizedRecord;
use crate::errors::PipelineError;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

#[cfg(test)]
pub use json::load_json;
pub use json::{write_json, JsonSink};
pub use xlsx::{record_row, records_workbook, Cell, XlsxSink};

/// Durable storage for a run's records. Returns where they went.
pub trait PersistenceSink {
    fn name(&self) -> &'static str;
    fn persist(&self, records: &[NormalizedRecord]) -> Result<PathBuf, PipelineError>;
}

/// `autotrader_data_20240131_170000.json` style names under `dir`.
pub fn output_path(dir: &Path, stem: &str, at: NaiveDateTime, ext: &str) -> PathBuf {
    dir.join(format!("{stem}_{}.{ext}", at.format("%Y%m%d_%H%M%S")))
}
