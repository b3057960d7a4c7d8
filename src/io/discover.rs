//! Station directory discovery.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;

/// List the `.csv` files directly inside `dir`, sorted by path.
///
/// Sorting keeps runs reproducible regardless of directory iteration order.
/// Subdirectories and other extensions are ignored.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::io(format!("Failed to read input directory '{}': {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::io(format!("Failed to list '{}': {e}", dir.display())))?;
        let path = entry.path();
        if path.is_file() && has_csv_extension(&path) {
            files.push(path);
        }
    }
    files.sort();

    debug!(dir = %dir.display(), count = files.len(), "Discovered CSV files");
    Ok(files)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_only_csv_files_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["b_1983.csv", "a_1982.CSV", "notes.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = discover_csv_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_1982.CSV", "b_1983.csv"]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = discover_csv_files(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
