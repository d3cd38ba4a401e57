// src/persist/json.rs

use crate::domain::NormalizedRecord;
use crate::errors::PipelineError;
use crate::persist::PersistenceSink;
use serde::Serialize;
use std::fs::File;
#[cfg(test)]
use std::io::BufReader;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Pretty-printed JSON array of records.
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PersistenceSink for JsonSink {
    fn name(&self) -> &'static str {
        "json"
    }

    fn persist(&self, records: &[NormalizedRecord]) -> Result<PathBuf, PipelineError> {
        write_json(&self.path, records)?;
        Ok(self.path.clone())
    }
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PipelineError> {
    let file = File::create(path)
        .map_err(|e| PipelineError::Persist(format!("Failed to create {}: {e}", path.display())))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)
        .map_err(|e| PipelineError::Persist(format!("Failed to write {}: {e}", path.display())))
}

#[cfg(test)]
pub fn load_json(path: &Path) -> Result<Vec<NormalizedRecord>, PipelineError> {
    let file = File::open(path)
        .map_err(|e| PipelineError::Persist(format!("Failed to open {}: {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| PipelineError::Persist(format!("Failed to read {}: {e}", path.display())))
}
