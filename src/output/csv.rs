//! CSV report writer.

use log::{debug, info};
use std::path::PathBuf;

use super::{ensure_parent_dir, header_title, validate_path, ReportSink};
use crate::aggregator::DiffRecord;
use crate::utils::error::ReportError;

/// Writes the ledger to a comma-separated file with a title-cased header
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for CsvSink {
    fn write(&mut self, records: &[DiffRecord]) -> Result<(), ReportError> {
        let Some(first) = records.first() else {
            debug!("No records to write");
            return Ok(());
        };

        validate_path(&self.path)?;
        ensure_parent_dir(&self.path)?;

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(first.field_names().iter().map(|f| header_title(f)))?;
        for record in records {
            writer.write_record(record.cells().iter().map(|c| c.as_text()))?;
        }
        writer.flush()?;

        info!("Saved results to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_write_csv_report() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("report.csv");

        let mut values = IndexMap::new();
        values.insert("model_id".to_string(), "m1".to_string());
        let record = DiffRecord {
            values,
            has_diff: true,
            has_data: true,
            diff: r#"{"a":1}"#.to_string(),
        };

        CsvSink::new(&path).write(&[record]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Model Id,Has Diff,Has Data,Diff"));
        assert_eq!(lines.next(), Some(r#"m1,true,true,"{""a"":1}""#));
    }
}
