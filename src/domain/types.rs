//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation
//! - exported to JSON next to the rendered chart

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Language used for chart labels and weekday axis codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// German labels (`Wochentag`, `Mo Di Mi ...`).
    De,
    /// English labels (`Weekday`, `Mo Tu We ...`).
    En,
}

/// Which statistic the pipeline computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationMode {
    /// Mean measurement per weekday across all years.
    WeekdayMean,
    /// Number of heavy rain days (measurement > cutoff) per weekday.
    WeekdayCount,
    /// Total rainfall per year, colored by the number of heavy rain days.
    Yearly,
}

impl AggregationMode {
    pub fn display_name(self) -> &'static str {
        match self {
            AggregationMode::WeekdayMean => "weekday mean",
            AggregationMode::WeekdayCount => "weekday heavy-day count",
            AggregationMode::Yearly => "yearly sum + heavy-day count",
        }
    }
}

/// Chart color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

/// Calendar weekday in the fixed chart order (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Resolve a two-letter weekday code (German or English, case-sensitive).
    ///
    /// Anything else (including partial or empty codes) is an unrecognized
    /// category and returns `None`.
    pub fn from_code(code: &str) -> Option<Weekday> {
        match code {
            "Mo" => Some(Weekday::Monday),
            "Di" | "Tu" => Some(Weekday::Tuesday),
            "Mi" | "We" => Some(Weekday::Wednesday),
            "Do" | "Th" => Some(Weekday::Thursday),
            "Fr" => Some(Weekday::Friday),
            "Sa" => Some(Weekday::Saturday),
            "So" | "Su" => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Two-letter code for axis labels.
    pub fn code(self, language: Language) -> &'static str {
        match (self, language) {
            (Weekday::Monday, _) => "Mo",
            (Weekday::Tuesday, Language::De) => "Di",
            (Weekday::Tuesday, Language::En) => "Tu",
            (Weekday::Wednesday, Language::De) => "Mi",
            (Weekday::Wednesday, Language::En) => "We",
            (Weekday::Thursday, Language::De) => "Do",
            (Weekday::Thursday, Language::En) => "Th",
            (Weekday::Friday, _) => "Fr",
            (Weekday::Saturday, _) => "Sa",
            (Weekday::Sunday, Language::De) => "So",
            (Weekday::Sunday, Language::En) => "Su",
        }
    }

    /// Zero-based position in the Monday-first order.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One CSV row before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Composite field such as `Mo, 01.01.`.
    pub date_field: String,
    pub measurement_field: String,
}

/// A normalized rainfall observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRecord {
    /// First two characters of the raw date field, not validated.
    pub weekday_code: String,
    /// Year taken from the source file name (absent if the name has no 4-digit run).
    pub year: Option<i32>,
    /// `DD.MM.` of the row combined with `year` (absent when either is unusable).
    pub calendar_date: Option<NaiveDate>,
    /// Liters per square meter.
    pub measurement: f64,
}

/// Inclusive range of years observed in the validated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSpan {
    pub min: i32,
    pub max: i32,
}

impl YearSpan {
    /// Min/max over every record that carries a year.
    pub fn from_records(records: &[ParsedRecord]) -> Option<YearSpan> {
        let mut years = records.iter().filter_map(|r| r.year);
        let first = years.next()?;
        let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Some(YearSpan { min, max })
    }
}

impl fmt::Display for YearSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Aggregated value for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayBucket {
    pub weekday: Weekday,
    /// Mean measurement or heavy-day count, depending on the mode.
    pub value: f64,
}

/// Aggregated values for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBucket {
    pub year: i32,
    /// Sum of all validated measurements of the year.
    pub total: f64,
    /// Number of days strictly above the cutoff (0 when none).
    pub heavy_days: usize,
    /// `heavy_days` normalized to `[0, 1]` across all years.
    pub color_intensity: f64,
}

/// Ordered aggregation output, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "buckets", rename_all = "lowercase")]
pub enum AggregateTable {
    Weekday(Vec<WeekdayBucket>),
    Yearly(Vec<YearBucket>),
}

impl AggregateTable {
    pub fn len(&self) -> usize {
        match self {
            AggregateTable::Weekday(b) => b.len(),
            AggregateTable::Yearly(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `.env` fallbacks).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub mode: AggregationMode,
    pub language: Language,
    /// Heavy rain threshold in l/m² (strictly greater than counts).
    pub cutoff: f64,
    /// Optional station name shown in chart titles.
    pub station: Option<String>,
    /// CSV field delimiter.
    pub delimiter: u8,

    pub theme: Theme,
    /// Output resolution; figure sizes are defined in inches.
    pub dpi: u32,
    /// Number of combined-dataset rows printed before aggregation.
    pub preview_rows: usize,

    pub export_json: Option<PathBuf>,
}

impl PipelineConfig {
    /// Defaults matching the original batch scripts (German labels, cutoff 5).
    pub fn new(input_dir: impl Into<PathBuf>, mode: AggregationMode) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: PathBuf::from("graphs"),
            mode,
            language: Language::De,
            cutoff: 5.0,
            station: None,
            delimiter: b',',
            theme: Theme::Dark,
            dpi: 300,
            preview_rows: 5,
            export_json: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: Option<i32>) -> ParsedRecord {
        ParsedRecord {
            weekday_code: "Mo".to_string(),
            year,
            calendar_date: None,
            measurement: 1.0,
        }
    }

    #[test]
    fn weekday_codes_resolve_in_both_languages() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_code(day.code(Language::De)), Some(day));
            assert_eq!(Weekday::from_code(day.code(Language::En)), Some(day));
        }
        assert_eq!(Weekday::from_code("mo"), None);
        assert_eq!(Weekday::from_code("M"), None);
        assert_eq!(Weekday::from_code("Xy"), None);
    }

    #[test]
    fn weekday_index_follows_calendar_order() {
        let idx: Vec<usize> = Weekday::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(idx, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn year_span_ignores_records_without_year() {
        let records = vec![record(Some(2001)), record(None), record(Some(1982)), record(Some(2023))];
        let span = YearSpan::from_records(&records).unwrap();
        assert_eq!(span, YearSpan { min: 1982, max: 2023 });
        assert_eq!(span.to_string(), "1982-2023");

        assert_eq!(YearSpan::from_records(&[record(None)]), None);
    }
}
