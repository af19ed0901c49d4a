//! Ordering, equality, and display semantics for property values.
//!
//! Property values are `serde_json::Value` nodes. Scalars (numbers, strings,
//! booleans) are *comparable*: they have a three-way ordering against values of
//! the same kind, and numbers compare numerically regardless of representation
//! (`18` and `18.0` are equal). Arrays and objects are only ever compared for
//! deep structural equality.

use std::cmp::Ordering;

use serde_json::{Number, Value};

/// Returns true if `value` participates in three-way ordering.
pub fn is_comparable(value: &Value) -> bool {
    matches!(value, Value::Number(_) | Value::String(_) | Value::Bool(_))
}

/// Three-way ordering of two values.
///
/// Returns `None` when the values are not mutually comparable (different
/// kinds, non-scalars, or a NaN-like float comparison).
///
/// ```rust
/// use inquest::value::compare_values;
/// use serde_json::json;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_values(&json!(15), &json!(18)), Some(Ordering::Less));
/// assert_eq!(compare_values(&json!(18), &json!(18.0)), Some(Ordering::Equal));
/// assert_eq!(compare_values(&json!("b"), &json!("a")), Some(Ordering::Greater));
/// assert_eq!(compare_values(&json!("18"), &json!(18)), None);
/// ```
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Equality used by the equal/not-equal validators when no comparer is supplied.
///
/// Comparable scalars use [`compare_values`]; everything else falls back to deep
/// structural equality.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    if is_comparable(left) && is_comparable(right) {
        compare_values(left, right) == Some(Ordering::Equal)
    } else {
        left == right
    }
}

/// Renders a value for use inside a failure message.
///
/// Strings are rendered without quotes and `null` renders as the empty string.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    match (as_integer(a), as_integer(b)) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}
