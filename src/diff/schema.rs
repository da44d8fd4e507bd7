//! Schema definitions for structural diffs.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Category of a single difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Same JSON type, different value
    ValuesChanged,
    /// Different JSON types at the same path
    TypeChanges,
    /// Key only in the new object
    DictionaryItemAdded,
    /// Key only in the old object
    DictionaryItemRemoved,
    /// Array element with no counterpart in the old array
    IterableItemAdded,
    /// Array element with no counterpart in the new array
    IterableItemRemoved,
}

/// Values on either side of one difference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

/// All differences between two payloads, grouped by kind and keyed by path
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StructuralDiff {
    changes: BTreeMap<ChangeKind, BTreeMap<String, ChangeDetail>>,
}

impl StructuralDiff {
    pub fn record(
        &mut self,
        kind: ChangeKind,
        path: String,
        old_value: Option<&Value>,
        new_value: Option<&Value>,
    ) {
        self.changes.entry(kind).or_default().insert(
            path,
            ChangeDetail {
                old_value: old_value.cloned(),
                new_value: new_value.cloned(),
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Total number of differences across all kinds
    pub fn len(&self) -> usize {
        self.changes.values().map(BTreeMap::len).sum()
    }

    pub fn get(&self, kind: ChangeKind) -> Option<&BTreeMap<String, ChangeDetail>> {
        self.changes.get(&kind)
    }
}

impl fmt::Display for StructuralDiff {
    /// Compact JSON, e.g. `{"values_changed":{"root['x']":{"old_value":1,"new_value":2}}}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
