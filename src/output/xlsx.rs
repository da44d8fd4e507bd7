//! Spreadsheet report writer.
//!
//! One worksheet holding a styled table: title-cased header row, one row
//! per record in ledger order, columns sized to their content.

use log::{debug, info};
use rust_xlsxwriter::{Table, TableColumn, TableStyle, Workbook};
use std::path::PathBuf;

use super::{ensure_parent_dir, header_title, validate_path, ReportSink};
use crate::aggregator::{Cell, DiffRecord};
use crate::utils::config::{REPORT_SHEET_NAME, REPORT_TABLE_NAME};
use crate::utils::error::ReportError;

// Excel refuses longer cell strings
const MAX_CELL_CHARS: usize = 32_767;

/// Writes the ledger to an `.xlsx` workbook
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for XlsxSink {
    fn write(&mut self, records: &[DiffRecord]) -> Result<(), ReportError> {
        let Some(first) = records.first() else {
            debug!("No records to write");
            return Ok(());
        };

        validate_path(&self.path)?;
        ensure_parent_dir(&self.path)?;

        let headers: Vec<String> = first.field_names().iter().map(|f| header_title(f)).collect();

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(REPORT_SHEET_NAME)?;

        for (idx, record) in records.iter().enumerate() {
            let row = (idx + 1) as u32;
            for (col, cell) in record.cells().into_iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(text) => worksheet.write_string(row, col, truncate(&text))?,
                    Cell::Bool(value) => worksheet.write_boolean(row, col, value)?,
                };
            }
        }

        let columns: Vec<TableColumn> = headers
            .iter()
            .map(|h| TableColumn::new().set_header(h))
            .collect();
        let table = Table::new()
            .set_name(REPORT_TABLE_NAME)
            .set_style(TableStyle::Light14)
            .set_banded_columns(true)
            .set_columns(&columns);

        let last_col = (headers.len() - 1) as u16;
        worksheet.add_table(0, 0, records.len() as u32, last_col, &table)?;
        worksheet.autofit();

        workbook.save(&self.path)?;

        info!("Saved results to {}", self.path.display());
        Ok(())
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_CELL_CHARS).collect()
}
