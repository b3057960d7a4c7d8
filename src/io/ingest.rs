//! CSV ingest for one station directory.
//!
//! Each file is a two-column export with a header row:
//!
//! ```text
//! Datum,Niederschlag
//! "Mo, 04.01.",0.3
//! "Di, 05.01.",-999
//! ```
//!
//! The year is not part of the rows; it is taken from the file name.
//! Row-level problems are collected and reported, never fatal. An unreadable
//! file aborts the run.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::{ParsedRecord, RawRecord};
use crate::error::AppError;
use crate::io::discover::discover_csv_files;
use crate::records::{extract_year, parse_record};

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub file: PathBuf,
    pub line: usize,
    pub message: String,
}

/// Per-file ingest bookkeeping.
#[derive(Debug, Clone)]
pub struct FileSummary {
    pub path: PathBuf,
    pub year: Option<i32>,
    pub rows_read: usize,
    pub rows_parsed: usize,
}

/// Ingest output: parsed (not yet validated) records + diagnostics.
#[derive(Debug, Clone, Default)]
pub struct IngestedData {
    pub records: Vec<ParsedRecord>,
    pub files: Vec<FileSummary>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedData {
    pub fn files_without_year(&self) -> usize {
        self.files.iter().filter(|f| f.year.is_none()).count()
    }
}

/// Discover and load every CSV file of a station directory.
pub fn load_station(dir: &Path, delimiter: u8) -> Result<IngestedData, AppError> {
    let files = discover_csv_files(dir)?;
    if files.is_empty() {
        return Err(AppError::no_data(format!(
            "No CSV files found in '{}'.",
            dir.display()
        )));
    }

    let mut data = IngestedData::default();
    for path in &files {
        load_file(path, delimiter, &mut data)?;
    }
    Ok(data)
}

/// Load one CSV file, appending its records and row errors to `data`.
pub fn load_file(path: &Path, delimiter: u8, data: &mut IngestedData) -> Result<(), AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let year = extract_year(&file_name);
    if year.is_none() {
        warn!(file = %file_name, "No 4-digit year in file name; dates for this file stay empty");
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut summary = FileSummary {
        path: path.to_path_buf(),
        year,
        rows_read: 0,
        rows_parsed: 0,
    };

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header row; lines are 1-based.
        let line = idx + 2;
        summary.rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| raw_record(&record))
            .and_then(|raw| parse_record(&raw, year));

        match parsed {
            Ok(record) => {
                summary.rows_parsed += 1;
                data.records.push(record);
            }
            Err(message) => data.row_errors.push(RowError {
                file: path.to_path_buf(),
                line,
                message,
            }),
        }
    }

    debug!(
        file = %file_name,
        year = ?year,
        rows_read = summary.rows_read,
        rows_parsed = summary.rows_parsed,
        "Loaded CSV file"
    );

    data.rows_read += summary.rows_read;
    data.files.push(summary);
    Ok(())
}

fn raw_record(record: &StringRecord) -> Result<RawRecord, String> {
    if record.len() < 2 {
        return Err(format!("Expected 2 columns, found {}.", record.len()));
    }
    Ok(RawRecord {
        date_field: record[0].to_string(),
        measurement_field: record[1].to_string(),
    })
}
