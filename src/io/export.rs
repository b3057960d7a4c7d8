//! Export the aggregate table to JSON.
//!
//! The export carries enough run metadata to redraw or compare a chart later
//! without re-reading the station CSVs.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{AggregateTable, AggregationMode, Language, YearSpan};
use crate::error::AppError;

/// On-disk JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateFile {
    pub tool: String,
    pub mode: AggregationMode,
    pub language: Language,
    pub cutoff: f64,
    pub years: Option<YearSpan>,
    pub y_label: String,
    /// File name the chart was (or would be) saved under.
    pub chart_file: String,
    pub table: AggregateTable,
}

/// Write an aggregate JSON file.
pub fn write_aggregate_json(path: &Path, export: &AggregateFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, export)
        .map_err(|e| AppError::io(format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

/// Read an aggregate JSON file.
pub fn read_aggregate_json(path: &Path) -> Result<AggregateFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open export JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::io(format!("Invalid export JSON: {e}")))
}
