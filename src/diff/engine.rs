//! Core structural diff implementation.

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::normalizer::{canonical_key, numbers_equal};
use super::schema::{ChangeKind, StructuralDiff};

/// Compare two payloads, ignoring array element order
///
/// # Example
/// ```ignore
/// let diff = structural_diff(&json!({"x": 1}), &json!({"x": 2}));
/// assert_eq!(diff.len(), 1);
/// ```
pub fn structural_diff(old: &Value, new: &Value) -> StructuralDiff {
    let mut diff = StructuralDiff::default();
    diff_values("root", old, new, &mut diff);
    diff
}

fn diff_values(path: &str, old: &Value, new: &Value, diff: &mut StructuralDiff) {
    match (old, new) {
        (Value::Object(a), Value::Object(b)) => diff_objects(path, a, b, diff),
        (Value::Array(a), Value::Array(b)) => diff_arrays(path, a, b, diff),
        (Value::Number(a), Value::Number(b)) => {
            if !numbers_equal(a, b) {
                diff.record(ChangeKind::ValuesChanged, path.to_string(), Some(old), Some(new));
            }
        }
        _ if same_type(old, new) => {
            if old != new {
                diff.record(ChangeKind::ValuesChanged, path.to_string(), Some(old), Some(new));
            }
        }
        _ => diff.record(ChangeKind::TypeChanges, path.to_string(), Some(old), Some(new)),
    }
}

fn diff_objects(
    path: &str,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    diff: &mut StructuralDiff,
) {
    for (key, old_value) in old {
        let child = format!("{}['{}']", path, key);
        match new.get(key) {
            Some(new_value) => diff_values(&child, old_value, new_value, diff),
            None => diff.record(ChangeKind::DictionaryItemRemoved, child, Some(old_value), None),
        }
    }

    for (key, new_value) in new {
        if !old.contains_key(key) {
            let child = format!("{}['{}']", path, key);
            diff.record(ChangeKind::DictionaryItemAdded, child, None, Some(new_value));
        }
    }
}

/// Set comparison of canonical elements; repetitions alone are no difference
fn diff_arrays(path: &str, old: &[Value], new: &[Value], diff: &mut StructuralDiff) {
    let old_keys: Vec<String> = old.iter().map(canonical_key).collect();
    let new_keys: Vec<String> = new.iter().map(canonical_key).collect();
    let old_set: HashSet<&str> = old_keys.iter().map(String::as_str).collect();
    let new_set: HashSet<&str> = new_keys.iter().map(String::as_str).collect();

    for (idx, key) in old_keys.iter().enumerate() {
        if !new_set.contains(key.as_str()) {
            diff.record(
                ChangeKind::IterableItemRemoved,
                format!("{}[{}]", path, idx),
                Some(&old[idx]),
                None,
            );
        }
    }

    for (idx, key) in new_keys.iter().enumerate() {
        if !old_set.contains(key.as_str()) {
            diff.record(
                ChangeKind::IterableItemAdded,
                format!("{}[{}]", path, idx),
                None,
                Some(&new[idx]),
            );
        }
    }
}

fn same_type(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}
