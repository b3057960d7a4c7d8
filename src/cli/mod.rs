//! Command-line parsing for the rainfall chart tool.
//!
//! Argument parsing and command dispatch are kept separate from the
//! aggregation and rendering code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{AggregationMode, Language, Theme};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rain", version, about = "Rainfall aggregation and bar charts for weather station CSVs")]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate a station directory, print the table, and save a PNG chart.
    Chart(ChartArgs),
    /// Aggregate and print the table only (no image).
    Table(ChartArgs),
}

/// Options shared by `chart` and `table`.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// Directory with the station's yearly CSV files.
    #[arg(short, long, env = "RAIN_INPUT_DIR", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Directory charts are written to (created if missing).
    #[arg(short, long, env = "RAIN_OUTPUT_DIR", default_value = "graphs", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Which statistic to compute.
    #[arg(short, long, value_enum, default_value_t = AggregationMode::WeekdayMean)]
    pub mode: AggregationMode,

    /// Label language.
    #[arg(short, long, value_enum, default_value_t = Language::De)]
    pub lang: Language,

    /// Heavy rain threshold in l/m² (days strictly above count as heavy).
    #[arg(short, long, env = "RAIN_CUTOFF", default_value_t = 5.0)]
    pub cutoff: f64,

    /// Station name used in chart titles.
    #[arg(long)]
    pub station: Option<String>,

    /// CSV field delimiter (single ASCII character).
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Chart color scheme.
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    pub theme: Theme,

    /// Output resolution (dots per inch).
    #[arg(long, default_value_t = 300)]
    pub dpi: u32,

    /// Print the first N rows of the combined dataset (0 disables).
    #[arg(long, default_value_t = 5)]
    pub preview: usize,

    /// Export the aggregate table (plus run metadata) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chart_command_with_defaults() {
        let cli = Cli::try_parse_from(["rain", "chart", "--input-dir", "data/Muenchen-Stadt"]).unwrap();
        let Command::Chart(args) = cli.command else {
            panic!("expected chart command");
        };
        assert_eq!(args.output_dir, PathBuf::from("graphs"));
        assert_eq!(args.mode, AggregationMode::WeekdayMean);
        assert_eq!(args.lang, Language::De);
        assert!((args.cutoff - 5.0).abs() < 1e-12);
        assert_eq!(args.delimiter, ',');
    }

    #[test]
    fn parses_mode_and_language() {
        let cli = Cli::try_parse_from([
            "rain", "table", "-i", "d", "--mode", "yearly", "--lang", "en", "--cutoff", "10", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Table(args) = cli.command else {
            panic!("expected table command");
        };
        assert_eq!(args.mode, AggregationMode::Yearly);
        assert_eq!(args.lang, Language::En);
        assert!((args.cutoff - 10.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["rain", "chart", "-i", "d", "--mode", "median"]).is_err());
    }
}
