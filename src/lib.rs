//! `rainfall-charts` library crate.
//!
//! The binary (`rain`) is a thin wrapper around this library so that:
//!
//! - the ingest/aggregation pipeline is testable without spawning processes
//! - rendering stays a separate, optional last step

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod records;
pub mod render;
pub mod report;
