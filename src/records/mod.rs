//! Record normalization: field extraction and validation.

pub mod extract;
pub mod validate;

pub use extract::*;
pub use validate::*;
