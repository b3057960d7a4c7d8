//! Shared pipeline logic used by the `chart` and `table` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! discover -> load/extract -> validate -> aggregate -> label/name
//!
//! Rendering and exporting are separate steps so the computed outputs can be
//! inspected (and tested) without touching the image backend.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::domain::{AggregateTable, ParsedRecord, PipelineConfig, YearSpan};
use crate::error::AppError;
use crate::io::export::{AggregateFile, write_aggregate_json};
use crate::io::ingest::{IngestedData, load_station};
use crate::records::retain_non_negative;
use crate::render::{ChartLabels, ChartStyle, chart_file_name, chart_labels, prepare_output_path, render_chart};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Ingest diagnostics; `ingest.records` is emptied once validated.
    pub ingest: IngestedData,
    /// Validated records (all `measurement >= 0`).
    pub records: Vec<ParsedRecord>,
    pub dropped_negative: usize,
    pub years: Option<YearSpan>,
    pub table: AggregateTable,
    pub labels: ChartLabels,
    /// Chart file name (without directory).
    pub chart_file: String,
}

/// Execute the full pipeline for the station directory in `config`.
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunOutput, AppError> {
    let ingest = load_station(&config.input_dir, config.delimiter)?;
    info!(
        files = ingest.files.len(),
        rows = ingest.rows_read,
        row_errors = ingest.row_errors.len(),
        "Loaded station data"
    );
    run_pipeline_with_ingest(config, ingest)
}

/// Execute the pipeline on already loaded data.
pub fn run_pipeline_with_ingest(config: &PipelineConfig, mut ingest: IngestedData) -> Result<RunOutput, AppError> {
    let validated = retain_non_negative(std::mem::take(&mut ingest.records));
    debug!(
        kept = validated.records.len(),
        dropped_negative = validated.dropped_negative,
        "Validated measurements"
    );

    if validated.records.is_empty() {
        return Err(AppError::no_data(format!(
            "No valid rows remain in '{}' after parsing/validation.",
            config.input_dir.display()
        )));
    }

    let years = YearSpan::from_records(&validated.records);
    let table = aggregate(&validated.records, config.mode, config.cutoff);
    if table.is_empty() {
        return Err(AppError::no_data(match &table {
            AggregateTable::Weekday(_) => "No record has a recognized weekday code.",
            AggregateTable::Yearly(_) => "No record carries a year (no 4-digit year in any file name).",
        }));
    }
    info!(mode = ?config.mode, buckets = table.len(), "Aggregated records");

    let labels = chart_labels(
        config.mode,
        config.language,
        config.cutoff,
        config.station.as_deref(),
        years,
    );
    let chart_file = chart_file_name(&labels.y, years);

    Ok(RunOutput {
        ingest,
        records: validated.records,
        dropped_negative: validated.dropped_negative,
        years,
        table,
        labels,
        chart_file,
    })
}

/// Render the chart into `config.output_dir` and return its path.
pub fn render_run(run: &RunOutput, config: &PipelineConfig) -> Result<PathBuf, AppError> {
    let path = prepare_output_path(&config.output_dir, &run.chart_file)?;
    let style = ChartStyle {
        theme: config.theme,
        dpi: config.dpi,
        language: config.language,
        mode: config.mode,
    };
    render_chart(&path, &run.table, &run.labels, &style)?;
    info!(path = %path.display(), "Chart written");
    Ok(path)
}

/// Build the JSON export document for a run.
pub fn export_document(run: &RunOutput, config: &PipelineConfig) -> AggregateFile {
    AggregateFile {
        tool: "rain".to_string(),
        mode: config.mode,
        language: config.language,
        cutoff: config.cutoff,
        years: run.years,
        y_label: run.labels.y.clone(),
        chart_file: run.chart_file.clone(),
        table: run.table.clone(),
    }
}

/// Write the JSON export if `config.export_json` is set.
pub fn export_run(run: &RunOutput, config: &PipelineConfig) -> Result<(), AppError> {
    if let Some(path) = &config.export_json {
        write_aggregate_json(path, &export_document(run, config))?;
        info!(path = %path.display(), "Aggregate JSON written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AggregationMode, Language};
    use crate::io::ingest::FileSummary;

    fn rec(code: &str, year: Option<i32>, measurement: f64) -> ParsedRecord {
        ParsedRecord {
            weekday_code: code.to_string(),
            year,
            calendar_date: None,
            measurement,
        }
    }

    fn ingest(records: Vec<ParsedRecord>) -> IngestedData {
        IngestedData {
            rows_read: records.len(),
            records,
            files: vec![FileSummary {
                path: PathBuf::from("s_2000.csv"),
                year: Some(2000),
                rows_read: 0,
                rows_parsed: 0,
            }],
            row_errors: Vec::new(),
        }
    }

    #[test]
    fn negatives_never_reach_the_table() {
        let mut config = PipelineConfig::new("unused", AggregationMode::WeekdayMean);
        config.language = Language::En;
        let data = ingest(vec![rec("Mo", Some(2000), -999.0), rec("Mo", Some(2000), 2.0), rec("Mo", Some(2001), 4.0)]);

        let run = run_pipeline_with_ingest(&config, data).unwrap();
        assert_eq!(run.dropped_negative, 1);
        assert!(run.ingest.records.is_empty());
        match &run.table {
            AggregateTable::Weekday(b) => assert!((b[0].value - 3.0).abs() < 1e-12),
            other => panic!("unexpected table: {other:?}"),
        }
        assert_eq!(run.chart_file, "Average_Rainfall_2000-2001.png");
    }

    #[test]
    fn only_negative_rows_is_no_data() {
        let config = PipelineConfig::new("unused", AggregationMode::Yearly);
        let err = run_pipeline_with_ingest(&config, ingest(vec![rec("Mo", Some(2000), -1.0)])).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn yearly_without_any_year_is_no_data() {
        let config = PipelineConfig::new("unused", AggregationMode::Yearly);
        let err = run_pipeline_with_ingest(&config, ingest(vec![rec("Mo", None, 1.0)])).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn export_document_mirrors_run() {
        let config = PipelineConfig::new("unused", AggregationMode::Yearly);
        let run = run_pipeline_with_ingest(&config, ingest(vec![rec("Mo", Some(2000), 6.0)])).unwrap();
        let doc = export_document(&run, &config);
        assert_eq!(doc.chart_file, "Gesamtniederschlag_2000-2000.png");
        assert_eq!(doc.table, run.table);
        assert_eq!(doc.years, Some(YearSpan { min: 2000, max: 2000 }));
    }
}
