//! Append-only record of comparison results.

use indexmap::IndexMap;
use serde::Serialize;

use crate::cases::TestCase;
use crate::diff::Comparison;

/// Result columns that follow the parameter values in every report row
pub const RESULT_FIELDS: [&str; 3] = ["has_diff", "has_data", "diff"];

/// One report row: the case's parameter values and its comparison result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    #[serde(flatten)]
    pub values: IndexMap<String, String>,
    pub has_diff: bool,
    pub has_data: bool,
    pub diff: String,
}

/// A typed report cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Bool(bool),
}

impl Cell {
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

impl DiffRecord {
    pub fn new(case: &TestCase, comparison: Comparison) -> Self {
        Self {
            values: case.values.clone(),
            has_diff: comparison.has_diff,
            has_data: comparison.has_data,
            diff: comparison.description,
        }
    }

    /// Field names in column order
    pub fn field_names(&self) -> Vec<String> {
        self.values
            .keys()
            .cloned()
            .chain(RESULT_FIELDS.map(String::from))
            .collect()
    }

    /// Cell values in the order of [`DiffRecord::field_names`]
    pub fn cells(&self) -> Vec<Cell> {
        self.values
            .values()
            .map(|v| Cell::Text(v.clone()))
            .chain([
                Cell::Bool(self.has_diff),
                Cell::Bool(self.has_data),
                Cell::Text(self.diff.clone()),
            ])
            .collect()
    }
}

/// Records in generation order; the only mutation is appending
#[derive(Debug, Clone, Default)]
pub struct ResultLedger {
    records: Vec<DiffRecord>,
}

impl ResultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DiffRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[DiffRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DiffRecord {
        let mut values = IndexMap::new();
        values.insert("model_id".to_string(), "m1".to_string());
        values.insert("region".to_string(), "eu".to_string());
        DiffRecord {
            values,
            has_diff: true,
            has_data: false,
            diff: "{}".to_string(),
        }
    }

    #[test]
    fn test_field_names_follow_values() {
        assert_eq!(
            record().field_names(),
            vec!["model_id", "region", "has_diff", "has_data", "diff"]
        );
    }

    #[test]
    fn test_cells_align_with_fields() {
        let cells = record().cells();
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0], Cell::Text("m1".to_string()));
        assert_eq!(cells[2], Cell::Bool(true));
        assert_eq!(cells[3].as_text(), "false");
    }

    #[test]
    fn test_record_serializes_flat() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["model_id"], "m1");
        assert_eq!(json["has_diff"], true);
    }

    #[test]
    fn test_ledger_appends_in_order() {
        let mut ledger = ResultLedger::new();
        let mut second = record();
        second.values["model_id"] = "m2".to_string();

        ledger.push(record());
        ledger.push(second);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records()[1].values["model_id"], "m2");
    }
}
