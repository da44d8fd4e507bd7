//! JSON report writer.
//!
//! Writes the ledger as a pretty-printed array of flat objects.

use log::{debug, info};
use serde_json::Value;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::{ensure_parent_dir, validate_path, ReportSink};
use crate::aggregator::DiffRecord;
use crate::utils::error::ReportError;

/// Writes the ledger to a JSON file
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for JsonSink {
    fn write(&mut self, records: &[DiffRecord]) -> Result<(), ReportError> {
        if records.is_empty() {
            debug!("No records to write");
            return Ok(());
        }

        validate_path(&self.path)?;
        ensure_parent_dir(&self.path)?;

        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), records)?;

        info!("Saved results to {}", self.path.display());
        Ok(())
    }
}

/// Read a JSON report back as loosely typed rows
///
/// # Errors
/// * `ReportError::WriteFailed` - file read error (reusing WriteFailed for I/O)
/// * `ReportError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<Vec<Value>, ReportError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path)?;
    let rows: Vec<Value> = serde_json::from_reader(file)?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn record(id: &str, has_diff: bool) -> DiffRecord {
        let mut values = IndexMap::new();
        values.insert("id".to_string(), id.to_string());
        DiffRecord {
            values,
            has_diff,
            has_data: true,
            diff: String::new(),
        }
    }

    #[test]
    fn test_write_and_read_report() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested/report.json");
        let mut sink = JsonSink::new(&path);

        sink.write(&[record("a", true), record("b", false)]).unwrap();

        let rows = read_report(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "a");
        assert_eq!(rows[1]["has_diff"], false);
    }

    #[test]
    fn test_overwrites_previous_write() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("report.json");
        let mut sink = JsonSink::new(&path);

        sink.write(&[record("a", true)]).unwrap();
        sink.write(&[record("a", true), record("b", true)]).unwrap();

        assert_eq!(read_report(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_ledger_not_written() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("report.json");

        JsonSink::new(&path).write(&[]).unwrap();
        assert!(!path.exists());
    }
}
