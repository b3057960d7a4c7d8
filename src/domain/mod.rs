//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configuration (`PipelineConfig`, `AggregationMode`, `Language`, `Theme`)
//! - raw and normalized rainfall records (`RawRecord`, `ParsedRecord`)
//! - aggregation outputs (`AggregateTable`, `WeekdayBucket`, `YearBucket`)

pub mod types;

pub use types::*;
