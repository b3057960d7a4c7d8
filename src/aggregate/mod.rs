//! Aggregation of validated records into chart-ready tables.
//!
//! Three modes:
//! - weekday mean: mean measurement per weekday (weekdays without records are omitted)
//! - weekday count: heavy rain days per weekday (all seven weekdays, zero-filled)
//! - yearly: total per year + heavy-day count per year + color intensity
//!
//! Output ordering is fixed: weekdays Monday..Sunday, years ascending.
//! Records with an unrecognized weekday code never reach a weekday table.

use std::collections::BTreeMap;

use crate::domain::{AggregateTable, AggregationMode, ParsedRecord, WeekdayBucket, Weekday, YearBucket};

/// Run the aggregation selected by `mode`.
pub fn aggregate(records: &[ParsedRecord], mode: AggregationMode, cutoff: f64) -> AggregateTable {
    match mode {
        AggregationMode::WeekdayMean => AggregateTable::Weekday(weekday_mean(records)),
        AggregationMode::WeekdayCount => AggregateTable::Weekday(weekday_heavy_count(records, cutoff)),
        AggregationMode::Yearly => AggregateTable::Yearly(yearly_sum_with_heavy_count(records, cutoff)),
    }
}

/// Mean measurement per weekday in Monday-first order.
pub fn weekday_mean(records: &[ParsedRecord]) -> Vec<WeekdayBucket> {
    let mut sums = [0.0_f64; 7];
    let mut counts = [0usize; 7];

    for r in records {
        if let Some(day) = Weekday::from_code(&r.weekday_code) {
            sums[day.index()] += r.measurement;
            counts[day.index()] += 1;
        }
    }

    Weekday::ALL
        .iter()
        .filter(|day| counts[day.index()] > 0)
        .map(|&day| WeekdayBucket {
            weekday: day,
            value: sums[day.index()] / counts[day.index()] as f64,
        })
        .collect()
}

/// Count of records with `measurement > cutoff` per weekday in Monday-first order.
pub fn weekday_heavy_count(records: &[ParsedRecord], cutoff: f64) -> Vec<WeekdayBucket> {
    let mut counts = [0usize; 7];

    for r in records.iter().filter(|r| is_heavy(r, cutoff)) {
        if let Some(day) = Weekday::from_code(&r.weekday_code) {
            counts[day.index()] += 1;
        }
    }

    Weekday::ALL
        .iter()
        .map(|&day| WeekdayBucket {
            weekday: day,
            value: counts[day.index()] as f64,
        })
        .collect()
}

/// Total measurement per year, joined with the heavy-day count of that year.
///
/// Years come from the sum side; a year with no heavy day gets a count of 0.
/// Records without a year are skipped.
pub fn yearly_sum_with_heavy_count(records: &[ParsedRecord], cutoff: f64) -> Vec<YearBucket> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    let mut heavy: BTreeMap<i32, usize> = BTreeMap::new();

    for r in records {
        let Some(year) = r.year else { continue };
        *totals.entry(year).or_default() += r.measurement;
        if is_heavy(r, cutoff) {
            *heavy.entry(year).or_default() += 1;
        }
    }

    let mut buckets: Vec<YearBucket> = totals
        .into_iter()
        .map(|(year, total)| YearBucket {
            year,
            total,
            heavy_days: heavy.get(&year).copied().unwrap_or(0),
            color_intensity: 0.0,
        })
        .collect();

    let counts: Vec<usize> = buckets.iter().map(|b| b.heavy_days).collect();
    for (bucket, intensity) in buckets.iter_mut().zip(color_intensity(&counts)) {
        bucket.color_intensity = intensity;
    }

    buckets
}

/// Min-max normalize counts to `[0, 1]`.
///
/// When every count is equal the range is empty; all intensities are 0.0.
pub fn color_intensity(counts: &[usize]) -> Vec<f64> {
    let (Some(&min), Some(&max)) = (counts.iter().min(), counts.iter().max()) else {
        return Vec::new();
    };
    if max == min {
        return vec![0.0; counts.len()];
    }
    let span = (max - min) as f64;
    counts.iter().map(|&c| (c - min) as f64 / span).collect()
}

fn is_heavy(record: &ParsedRecord, cutoff: f64) -> bool {
    record.measurement > cutoff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(code: &str, year: Option<i32>, measurement: f64) -> ParsedRecord {
        ParsedRecord {
            weekday_code: code.to_string(),
            year,
            calendar_date: None,
            measurement,
        }
    }

    #[test]
    fn weekday_mean_basic() {
        let records = vec![rec("Mo", Some(2000), 2.0), rec("Mo", Some(2001), 4.0), rec("Mo", None, 6.0)];
        let out = weekday_mean(&records);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].weekday, Weekday::Monday);
        assert!((out[0].value - 4.0).abs() < 1e-12);
    }

    #[test]
    fn weekday_mean_is_calendar_ordered_and_drops_unknown() {
        let records = vec![
            rec("So", None, 1.0),
            rec("Xx", None, 100.0),
            rec("Mi", None, 2.0),
            rec("Mo", None, 3.0),
            rec("Tu", None, 5.0),
            rec("Di", None, 7.0),
        ];
        let out = weekday_mean(&records);
        let days: Vec<Weekday> = out.iter().map(|b| b.weekday).collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday, Weekday::Sunday]);
        // German and English codes for the same day share one bucket.
        assert!((out[1].value - 6.0).abs() < 1e-12);
    }

    #[test]
    fn weekday_count_uses_strict_cutoff_and_zero_fills() {
        let records = vec![
            rec("Mo", None, 3.0),
            rec("Mo", None, 7.0),
            rec("Mo", None, 10.0),
            rec("Tu", None, 2.0),
            rec("Fr", None, 5.0),
        ];
        let out = weekday_heavy_count(&records, 5.0);
        assert_eq!(out.len(), 7);
        assert_eq!(out[0].weekday, Weekday::Monday);
        assert!((out[0].value - 2.0).abs() < 1e-12);
        assert_eq!(out[1].weekday, Weekday::Tuesday);
        assert!(out[1].value.abs() < 1e-12);
        // Exactly the cutoff is not heavy.
        assert!(out[4].value.abs() < 1e-12);
    }

    #[test]
    fn yearly_sum_and_heavy_count() {
        let records = vec![rec("Mo", Some(2000), 1.0), rec("Di", Some(2000), 2.0), rec("Mi", Some(2000), 3.0)];
        let out = yearly_sum_with_heavy_count(&records, 2.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].year, 2000);
        assert!((out[0].total - 6.0).abs() < 1e-12);
        assert_eq!(out[0].heavy_days, 1);
        // Single year: empty range, defined as 0.
        assert_eq!(out[0].color_intensity, 0.0);
    }

    #[test]
    fn yearly_left_join_fills_zero_and_sorts_years() {
        let records = vec![
            rec("Mo", Some(2003), 9.0),
            rec("Mo", Some(2001), 1.0),
            rec("Mo", None, 50.0),
            rec("Mo", Some(2002), 8.0),
            rec("Di", Some(2002), 7.0),
        ];
        let out = yearly_sum_with_heavy_count(&records, 5.0);
        let years: Vec<i32> = out.iter().map(|b| b.year).collect();
        assert_eq!(years, vec![2001, 2002, 2003]);

        assert_eq!(out[0].heavy_days, 0);
        assert_eq!(out[1].heavy_days, 2);
        assert_eq!(out[2].heavy_days, 1);

        assert!((out[0].color_intensity - 0.0).abs() < 1e-12);
        assert!((out[1].color_intensity - 1.0).abs() < 1e-12);
        assert!((out[2].color_intensity - 0.5).abs() < 1e-12);
    }

    #[test]
    fn color_intensity_flat_counts_are_zero() {
        assert_eq!(color_intensity(&[3, 3, 3]), vec![0.0, 0.0, 0.0]);
        assert!(color_intensity(&[]).is_empty());
    }

    #[test]
    fn aggregate_is_order_independent() {
        let mut records = vec![
            rec("Sa", Some(1990), 6.0),
            rec("Mo", Some(1991), 1.0),
            rec("Do", Some(1990), 12.0),
            rec("Mo", Some(1992), 0.0),
        ];
        let a = aggregate(&records, AggregationMode::WeekdayMean, 5.0);
        records.reverse();
        let b = aggregate(&records, AggregationMode::WeekdayMean, 5.0);
        assert_eq!(a, b);

        let y = aggregate(&records, AggregationMode::Yearly, 5.0);
        assert_eq!(y.len(), 3);
    }
}
