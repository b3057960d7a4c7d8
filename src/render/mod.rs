//! Chart rendering and output naming.
//!
//! This module only draws and names; the aggregate table arrives fully
//! computed and ordered.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::YearSpan;
use crate::error::AppError;

pub mod chart;
pub mod labels;
pub mod palette;

pub use chart::*;
pub use labels::*;

/// Strip parenthesized parts (with the whitespace before them), trim, and
/// replace spaces with underscores.
///
/// `"Total Rainfall (Liters per m²)"` -> `"Total_Rainfall"`.
/// An unmatched `(` is kept as-is.
pub fn sanitize_label(label: &str) -> String {
    let chars: Vec<char> = label.chars().collect();
    let mut out = String::with_capacity(label.len());
    let mut i = 0;

    while i < chars.len() {
        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if j < chars.len() && chars[j] == '(' {
            if let Some(close) = chars[j + 1..].iter().position(|&c| c == ')') {
                i = j + close + 2;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out.trim().replace(' ', "_")
}

/// `<sanitized label>_<min>-<max>.png`, or `<sanitized label>.png` without years.
pub fn chart_file_name(y_label: &str, years: Option<YearSpan>) -> String {
    let label = sanitize_label(y_label);
    match years {
        Some(span) => format!("{label}_{span}.png"),
        None => format!("{label}.png"),
    }
}

/// Create `output_dir` if needed and return the full chart path.
pub fn prepare_output_path(output_dir: &Path, file_name: &str) -> Result<PathBuf, AppError> {
    fs::create_dir_all(output_dir).map_err(|e| {
        AppError::io(format!(
            "Failed to create output directory '{}': {e}",
            output_dir.display()
        ))
    })?;
    Ok(output_dir.join(file_name))
}
