//! Input/output helpers.
//!
//! - station directory discovery (`discover`)
//! - CSV ingest (`ingest`)
//! - aggregate JSON export (`export`)

pub mod discover;
pub mod export;
pub mod ingest;

pub use discover::*;
pub use export::*;
pub use ingest::*;
