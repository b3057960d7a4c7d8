//! Chart label catalog (German and English).
//!
//! The y-axis label doubles as the basis of the output file name, so its
//! wording determines where the chart lands on disk.

use crate::domain::{AggregationMode, Language, YearSpan};

/// All text drawn around a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    pub x: String,
    pub y: String,
    /// May contain `\n` for multi-line titles.
    pub title: String,
    /// Only the yearly chart has a colorbar.
    pub colorbar: Option<String>,
}

/// Build the labels for one run.
pub fn chart_labels(
    mode: AggregationMode,
    language: Language,
    cutoff: f64,
    station: Option<&str>,
    years: Option<YearSpan>,
) -> ChartLabels {
    let span = years
        .map(|y| format!(" ({}–{})", y.min, y.max))
        .unwrap_or_default();

    match (mode, language) {
        (AggregationMode::WeekdayMean, Language::De) => ChartLabels {
            x: "Wochentag".to_string(),
            y: "Durchschnittlicher Niederschlag (Liter pro m²)".to_string(),
            title: match station {
                Some(s) => format!("Durchschnittlicher Regen pro Wochentag in {s}{span}"),
                None => format!("Durchschnittlicher Regen pro Wochentag{span}"),
            },
            colorbar: None,
        },
        (AggregationMode::WeekdayMean, Language::En) => ChartLabels {
            x: "Weekday".to_string(),
            y: "Average Rainfall (Liters per m²)".to_string(),
            title: match station {
                Some(s) => format!("Average Rainfall per Weekday in {s}{span}"),
                None => format!("Average Rainfall per Weekday{span}"),
            },
            colorbar: None,
        },
        (AggregationMode::WeekdayCount, Language::De) => ChartLabels {
            x: "Wochentag".to_string(),
            y: format!("Anzahl der Regentage (>{cutoff} Liter/m²)"),
            title: format!("Anzahl der Regentage pro Wochentag{span}"),
            colorbar: None,
        },
        (AggregationMode::WeekdayCount, Language::En) => ChartLabels {
            x: "Weekday".to_string(),
            y: format!("Number of Rainy Days (>{cutoff} L/m²)"),
            title: format!("Number of Rainy Days per Weekday{span}"),
            colorbar: None,
        },
        (AggregationMode::Yearly, Language::De) => ChartLabels {
            x: "Jahr".to_string(),
            y: "Gesamtniederschlag (Liter/m²)".to_string(),
            title: format!("Jährlicher Gesamtniederschlag\nFarbskala nach Regentagen > {cutoff} Liter/qm"),
            colorbar: Some("Anzahl der starken Regentage".to_string()),
        },
        (AggregationMode::Yearly, Language::En) => ChartLabels {
            x: "Year".to_string(),
            y: "Total Rainfall (Liters per m²)".to_string(),
            title: format!("Annual Total Rainfall\nColor scale by rainy days (> {cutoff} Liters/sqm)"),
            colorbar: Some("Number of Heavy Rain Days".to_string()),
        },
    }
}
