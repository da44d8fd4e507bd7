//! Report writers for the result ledger.
//!
//! Every sink receives the complete ledger on each call and overwrites its
//! previous output, so a checkpoint is always a full, self-contained report:
//! - XLSX workbooks (default)
//! - CSV tables
//! - JSON arrays

pub mod csv;
pub mod json;
pub mod xlsx;

// Re-export main types
pub use self::csv::CsvSink;
pub use json::{read_report, JsonSink};
pub use xlsx::XlsxSink;

use log::debug;
use std::path::Path;

use crate::aggregator::DiffRecord;
use crate::utils::error::ReportError;

/// Destination for the result ledger
pub trait ReportSink {
    /// Persist `records`, replacing anything written before
    fn write(&mut self, records: &[DiffRecord]) -> Result<(), ReportError>;
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn write(&mut self, records: &[DiffRecord]) -> Result<(), ReportError> {
        (**self).write(records)
    }
}

/// Pick a sink from the output file extension (`.csv`, `.json`, else XLSX)
pub fn sink_for_path(path: &Path) -> Box<dyn ReportSink> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("csv") => Box::new(CsvSink::new(path)),
        Some("json") => Box::new(JsonSink::new(path)),
        _ => Box::new(XlsxSink::new(path)),
    }
}

/// Report header for a field name: `has_diff` becomes `Has Diff`
pub fn header_title(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut prev_cased = false;

    for c in field.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }

    out
}

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), ReportError> {
    if path.as_os_str().is_empty() {
        return Err(ReportError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(ReportError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories of an output file
pub fn ensure_parent_dir(path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                ReportError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_title() {
        assert_eq!(header_title("has_diff"), "Has Diff");
        assert_eq!(header_title("model_id"), "Model Id");
        assert_eq!(header_title("modelID"), "Modelid");
        assert_eq!(header_title("diff"), "Diff");
        assert_eq!(header_title("v2_name"), "V2 Name");
    }

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }
}
