//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the aggregation pipeline
//! - prints the summary/table
//! - renders the chart and writes optional exports

use clap::Parser;
use tracing::warn;

use crate::cli::{ChartArgs, Command};
use crate::domain::PipelineConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `rain` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is normal; only the env fallbacks of the CLI read it.
    let _ = dotenvy::dotenv();

    let cli = crate::cli::Cli::parse();
    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Chart(args) => handle(args, OutputMode::Chart),
        Command::Table(args) => handle(args, OutputMode::TableOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Chart,
    TableOnly,
}

fn handle(args: ChartArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = pipeline_config_from_args(&args)?;
    let run = pipeline::run_pipeline(&config)?;

    if mode == OutputMode::Chart {
        println!(
            "{}",
            crate::report::format_run_summary(
                &run.ingest,
                run.dropped_negative,
                run.records.len(),
                run.years,
                &config
            )
        );
        if config.preview_rows > 0 {
            println!("{}", crate::report::format_preview(&run.records, config.preview_rows));
        }
    }

    println!("{}", crate::report::format_table(&run.table, config.language));

    if mode == OutputMode::Chart {
        let path = pipeline::render_run(&run, &config)?;
        println!("Graph saved as: {}", path.display());
    }

    pipeline::export_run(&run, &config)?;

    Ok(())
}

pub fn pipeline_config_from_args(args: &ChartArgs) -> Result<PipelineConfig, AppError> {
    if !args.delimiter.is_ascii() {
        return Err(AppError::io(format!(
            "Delimiter must be a single ASCII character, got '{}'.",
            args.delimiter
        )));
    }
    if !args.cutoff.is_finite() {
        return Err(AppError::io("`--cutoff` must be a finite number."));
    }
    if args.dpi == 0 {
        warn!("`--dpi 0` is not usable; falling back to 1");
    }

    Ok(PipelineConfig {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        mode: args.mode,
        language: args.lang,
        cutoff: args.cutoff,
        station: args.station.clone(),
        delimiter: args.delimiter as u8,
        theme: args.theme,
        dpi: args.dpi.max(1),
        preview_rows: args.preview,
        export_json: args.export_json.clone(),
    })
}
