//! Canonical forms used for order-insensitive comparison.

use serde_json::{Map, Number, Value};

/// Rewrite a value so equal payloads have identical representations
///
/// Object keys are sorted, arrays become the sorted set of their elements'
/// canonical forms (repetitions dropped), and integral floats become integers.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let mut sorted = Map::new();
            for (key, val) in entries {
                sorted.insert(key.clone(), canonicalize(val));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => {
            let mut keyed: Vec<(String, Value)> = items
                .iter()
                .map(|item| {
                    let canonical = canonicalize(item);
                    (canonical.to_string(), canonical)
                })
                .collect();
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
            keyed.dedup_by(|a, b| a.0 == b.0);
            Value::Array(keyed.into_iter().map(|(_, v)| v).collect())
        }
        Value::Number(n) => Value::Number(normalize_number(n)),
        other => other.clone(),
    }
}

/// Stable string identity of a value under order-insensitive comparison
pub fn canonical_key(value: &Value) -> String {
    canonicalize(value).to_string()
}

/// Numeric equality across integer and float representations
///
/// Integers compare exactly. A float equals an integer only when it holds
/// exactly that integral value; two non-integral floats compare as `f64`.
/// [`canonicalize`] applies the same rule, so array elements and scalars
/// agree on equality.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integral_value(a), integral_value(b)) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a.as_f64() == b.as_f64(),
        _ => false,
    }
}

/// Exact integral value of a number within the `i64`/`u64` range
fn integral_value(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }

    // [-2^63, 2^64) covers both integer types; floats in it convert exactly
    let f = n.as_f64()?;
    let in_range = (-9_223_372_036_854_775_808.0..18_446_744_073_709_551_616.0).contains(&f);
    if f.fract() == 0.0 && in_range {
        Some(f as i128)
    } else {
        None
    }
}

fn normalize_number(n: &Number) -> Number {
    if !n.is_f64() {
        return n.clone();
    }

    match integral_value(n) {
        Some(v) => match (i64::try_from(v), u64::try_from(v)) {
            (Ok(i), _) => Number::from(i),
            (_, Ok(u)) => Number::from(u),
            _ => n.clone(),
        },
        None => n.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_key_ignores_array_order() {
        assert_eq!(
            canonical_key(&json!([{"b": 1, "a": [3, 1]}, 2])),
            canonical_key(&json!([2, {"a": [1, 3], "b": 1}]))
        );
    }

    #[test]
    fn test_canonical_key_ignores_repetition() {
        assert_eq!(
            canonical_key(&json!([[1, 2], 3])),
            canonical_key(&json!([3, [2, 1, 2]]))
        );
    }

    #[test]
    fn test_integral_float_normalized() {
        assert_eq!(canonical_key(&json!(1.0)), canonical_key(&json!(1)));
        assert_ne!(canonical_key(&json!(1.5)), canonical_key(&json!(1)));
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let int = Number::from(9_007_199_254_740_993u64);
        let float = Number::from_f64(9_007_199_254_740_992.0).unwrap();
        assert!(!numbers_equal(&int, &float));
        assert_ne!(
            canonical_key(&Value::Number(int)),
            canonical_key(&Value::Number(float))
        );

        let max = Number::from(u64::MAX);
        let two_pow_64 = Number::from_f64(18_446_744_073_709_551_616.0).unwrap();
        assert!(!numbers_equal(&max, &two_pow_64));
    }

    #[test]
    fn test_numbers_equal() {
        let one = Number::from(1);
        let one_f = Number::from_f64(1.0).unwrap();
        let two = Number::from(2);
        assert!(numbers_equal(&one, &one_f));
        assert!(!numbers_equal(&one, &two));
    }
}
