//! Reduction of a structural diff to the per-case comparison result.

use serde_json::Value;

use super::engine::structural_diff;

/// Outcome of comparing the old and new payload of one test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub has_diff: bool,
    pub has_data: bool,
    /// Empty when there is no difference
    pub description: String,
}

/// Compare two payloads for one test case
pub fn compare_payloads(old: &Value, new: &Value) -> Comparison {
    let diff = structural_diff(old, new);
    let has_diff = !diff.is_empty();

    Comparison {
        has_diff,
        has_data: !is_empty_json(old) || !is_empty_json(new),
        description: if has_diff {
            diff.to_string()
        } else {
            String::new()
        },
    }
}

/// `null`, `""`, `{}`, `[]`, `0` and `false` count as no data
pub fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
