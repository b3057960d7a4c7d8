//! Field extraction: turn raw CSV rows into `ParsedRecord`s.
//!
//! The station exports split the date across two places:
//! - the row carries `Mo, 01.01.` (weekday prefix + day/month)
//! - the year only appears in the file name (`Muenchen_Stadt_1982T3.csv`)
//!
//! Missing pieces never abort the run. A file without a year yields records
//! without `year`/`calendar_date`; a row without a `DD.MM.` yields a record
//! without `calendar_date`.

use chrono::NaiveDate;

use crate::domain::{ParsedRecord, RawRecord};

/// Extract the first run of four ASCII digits from a file name.
///
/// Longer digit runs contribute their first four digits (`12345` -> `1234`).
pub fn extract_year(file_name: &str) -> Option<i32> {
    let bytes = file_name.as_bytes();
    bytes
        .windows(4)
        .find(|w| w.iter().all(u8::is_ascii_digit))
        .and_then(|w| std::str::from_utf8(w).ok())
        .and_then(|s| s.parse().ok())
}

/// First two characters of the date field, verbatim.
pub fn extract_weekday_code(date_field: &str) -> String {
    date_field.chars().take(2).collect()
}

/// Find the first `DD.MM.` substring of the date field.
pub fn extract_day_month(date_field: &str) -> Option<&str> {
    let bytes = date_field.as_bytes();
    (0..bytes.len().saturating_sub(5))
        .find(|&i| is_day_month(&bytes[i..i + 6]))
        .map(|i| &date_field[i..i + 6])
}

fn is_day_month(w: &[u8]) -> bool {
    w[0].is_ascii_digit()
        && w[1].is_ascii_digit()
        && w[2] == b'.'
        && w[3].is_ascii_digit()
        && w[4].is_ascii_digit()
        && w[5] == b'.'
}

/// Combine `DD.MM.` with the file year and parse as `%d.%m.%Y`.
///
/// Impossible dates (`30.02.`) and missing parts yield `None`.
pub fn reconstruct_date(date_field: &str, year: Option<i32>) -> Option<NaiveDate> {
    let day_month = extract_day_month(date_field)?;
    let year = year?;
    NaiveDate::parse_from_str(&format!("{day_month}{year:04}"), "%d.%m.%Y").ok()
}

/// Parse the measurement column.
///
/// Blank cells and non-numeric values are row errors; non-finite values
/// (`NaN`, `inf`) are rejected as well.
pub fn parse_measurement(field: &str) -> Result<f64, String> {
    let s = field.trim();
    if s.is_empty() {
        return Err("Missing measurement value.".to_string());
    }
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid measurement '{s}' (expected a number)."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite measurement '{s}'."));
    }
    Ok(v)
}

/// Build a `ParsedRecord` from one raw row and the owning file's year.
pub fn parse_record(raw: &RawRecord, year: Option<i32>) -> Result<ParsedRecord, String> {
    let measurement = parse_measurement(&raw.measurement_field)?;

    Ok(ParsedRecord {
        weekday_code: extract_weekday_code(&raw.date_field),
        year,
        calendar_date: reconstruct_date(&raw.date_field, year),
        measurement,
    })
}
