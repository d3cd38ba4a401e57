// src/persist/xlsx.rs

use crate::domain::{NormalizedRecord, RECORD_COLUMNS};
use crate::errors::PipelineError;
use crate::persist::PersistenceSink;
use rust_xlsxwriter::Workbook;
use std::path::PathBuf;

/// Flat sheet: header row of field names, one row per record.
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PersistenceSink for XlsxSink {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    fn persist(&self, records: &[NormalizedRecord]) -> Result<PathBuf, PipelineError> {
        let buffer = records_workbook(records)?;
        std::fs::write(&self.path, buffer).map_err(|e| {
            PipelineError::Persist(format!("Failed to write {}: {e}", self.path.display()))
        })?;
        Ok(self.path.clone())
    }
}

/// One worksheet cell. `Empty` leaves the cell blank.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

/// The cells of one record, one per entry of `RECORD_COLUMNS`, in that order.
pub fn record_row(record: &NormalizedRecord) -> Vec<Cell> {
    RECORD_COLUMNS
        .iter()
        .map(|column| {
            if *column == "price_delta_amount" {
                return Cell::Number(record.price_delta_amount as f64);
            }
            match record.listing.field(column) {
                Some(value) => Cell::Text(value.to_string()),
                None => Cell::Empty,
            }
        })
        .collect()
}

pub fn records_workbook(records: &[NormalizedRecord]) -> Result<Vec<u8>, PipelineError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in RECORD_COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                PipelineError::Persist(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, record) in records.iter().enumerate() {
        let r = (i + 1) as u32;

        for (col, cell) in record_row(record).into_iter().enumerate() {
            let c = col as u16;
            let column = RECORD_COLUMNS[col];
            match cell {
                Cell::Text(value) => {
                    worksheet.write_string(r, c, value).map_err(|e| {
                        PipelineError::Persist(format!("Failed to write {column}: {e}"))
                    })?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(r, c, value).map_err(|e| {
                        PipelineError::Persist(format!("Failed to write {column}: {e}"))
                    })?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| PipelineError::Persist(format!("Failed to save workbook: {}", e)))
}
