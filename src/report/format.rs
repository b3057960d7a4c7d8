//! Formatted terminal output: run summary, dataset preview, aggregate table.
//!
//! Formatting lives here so the pipeline and aggregation code stay free of
//! presentation concerns.

use crate::domain::{AggregateTable, Language, ParsedRecord, PipelineConfig, YearSpan};
use crate::io::ingest::IngestedData;

/// Dataset statistics printed before the table.
pub fn format_run_summary(
    ingest: &IngestedData,
    dropped_negative: usize,
    records_used: usize,
    years: Option<YearSpan>,
    config: &PipelineConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== rain - rainfall charts ===\n");
    out.push_str(&format!("Input: {}\n", config.input_dir.display()));
    if let Some(station) = &config.station {
        out.push_str(&format!("Station: {station}\n"));
    }
    out.push_str(&format!(
        "Mode: {} | cutoff > {} l/m²\n",
        config.mode.display_name(),
        config.cutoff
    ));
    out.push_str(&format!(
        "Files: {} ({} without year in name)\n",
        ingest.files.len(),
        ingest.files_without_year()
    ));
    out.push_str(&format!(
        "Rows: read={} | row errors={} | negative dropped={} | used={}\n",
        ingest.rows_read,
        ingest.row_errors.len(),
        dropped_negative,
        records_used
    ));
    match years {
        Some(span) => out.push_str(&format!("Years: {}–{}\n", span.min, span.max)),
        None => out.push_str("Years: none found in file names\n"),
    }

    for err in ingest.row_errors.iter().take(5) {
        out.push_str(&format!(
            "  ! {}:{} {}\n",
            err.file.display(),
            err.line,
            err.message
        ));
    }
    if ingest.row_errors.len() > 5 {
        out.push_str(&format!("  ! ... {} more\n", ingest.row_errors.len() - 5));
    }

    out
}

/// First `n` records of the combined dataset.
pub fn format_preview(records: &[ParsedRecord], n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<4} {:<6} {:<12} {:>10}\n", "day", "year", "date", "l/m²"));
    for r in records.iter().take(n) {
        out.push_str(&format!(
            "{:<4} {:<6} {:<12} {:>10.1}\n",
            r.weekday_code,
            r.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
            r.calendar_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            r.measurement
        ));
    }
    out
}

/// Aggregate table, one row per bucket, in chart order.
pub fn format_table(table: &AggregateTable, language: Language) -> String {
    let mut out = String::new();
    match table {
        AggregateTable::Weekday(buckets) => {
            out.push_str(&format!("{:<4} {:>10}\n", "day", "value"));
            for b in buckets {
                out.push_str(&format!("{:<4} {:>10.2}\n", b.weekday.code(language), b.value));
            }
        }
        AggregateTable::Yearly(buckets) => {
            out.push_str(&format!(
                "{:<6} {:>10} {:>6} {:>9}\n",
                "year", "total", "heavy", "intensity"
            ));
            for b in buckets {
                out.push_str(&format!(
                    "{:<6} {:>10.1} {:>6} {:>9.3}\n",
                    b.year, b.total, b.heavy_days, b.color_intensity
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Weekday, WeekdayBucket, YearBucket};

    #[test]
    fn weekday_table_uses_language_codes() {
        let table = AggregateTable::Weekday(vec![
            WeekdayBucket { weekday: Weekday::Tuesday, value: 1.5 },
            WeekdayBucket { weekday: Weekday::Sunday, value: 0.25 },
        ]);
        let de = format_table(&table, Language::De);
        let en = format_table(&table, Language::En);
        assert!(de.contains("Di"));
        assert!(de.contains("So"));
        assert!(en.contains("Tu"));
        assert!(en.contains("Su"));
        assert_eq!(de.lines().count(), 3);
    }

    #[test]
    fn yearly_table_lists_heavy_days() {
        let table = AggregateTable::Yearly(vec![YearBucket {
            year: 2000,
            total: 6.0,
            heavy_days: 1,
            color_intensity: 0.0,
        }]);
        let out = format_table(&table, Language::En);
        let row = out.lines().nth(1).unwrap();
        assert!(row.starts_with("2000"));
        assert!(row.contains("6.0"));
    }

    #[test]
    fn preview_marks_missing_fields() {
        let records = vec![ParsedRecord {
            weekday_code: "Mo".to_string(),
            year: None,
            calendar_date: None,
            measurement: 3.0,
        }];
        let out = format_preview(&records, 5);
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().nth(1).unwrap().contains('-'));
    }
}
