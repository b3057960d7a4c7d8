//! Measurement validation.
//!
//! Negative readings are station error markers (e.g. `-999`), not rainfall.
//! They are removed before aggregation; nothing else about a record is checked.

use crate::domain::ParsedRecord;

/// Records that passed validation plus how many were dropped.
#[derive(Debug, Clone, Default)]
pub struct Validated {
    pub records: Vec<ParsedRecord>,
    pub dropped_negative: usize,
}

/// Keep only records with `measurement >= 0`.
pub fn retain_non_negative(records: Vec<ParsedRecord>) -> Validated {
    let before = records.len();
    let records: Vec<ParsedRecord> = records.into_iter().filter(|r| r.measurement >= 0.0).collect();

    Validated {
        dropped_negative: before - records.len(),
        records,
    }
}
