//! Field value representation for records.
//!
//! This module provides the closed set of value kinds a record field can hold,
//! along with the comparison semantics used by the filter evaluator and the
//! sort pipeline. Numbers are normalized to `f64`, and instants are compared
//! by the underlying point in time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

/// A single record field value.
///
/// This is a closed set: every field of every record holds exactly one of
/// these variants. Values of different kinds never compare as ordered, and
/// only values of the same kind compare as equal.
///
/// # Example
///
/// ```ignore
/// use recbox::value::Value;
///
/// let name = Value::from("Alice");
/// let age = Value::from(25);
/// assert!(name != age);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null / no value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value (all integers and floats normalized to f64).
    Number(f64),
    /// Text value.
    Text(String),
    /// Point-in-time value, compared by the underlying instant.
    Instant(DateTime<Utc>),
}

/// The kind of a [`Value`], as seen by the filter evaluator.
///
/// The evaluator dispatches on this at runtime to decide which operators in a
/// field's operator set apply. `Null` and `Bool` fold into [`ValueKind::Other`],
/// which only supports strict equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Text values: equality and substring operators apply.
    Text,
    /// Numeric values: equality and ordered comparison operators apply.
    Number,
    /// Point-in-time values: equality and before/after/range operators apply.
    Instant,
    /// Everything else (booleans, null): only strict equality applies.
    Other,
}

impl Value {
    /// Returns the kind of this value for operator dispatch.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Number(_) => ValueKind::Number,
            Value::Instant(_) => ValueKind::Instant,
            Value::Null | Value::Bool(_) => ValueKind::Other,
        }
    }

    /// Returns this value as a canonical key string, if its kind can serve as
    /// a lookup key.
    ///
    /// Text values are used verbatim. Integral numbers are formatted without a
    /// fractional part, so `Value::from(42)` and `Value::from(42.0)` resolve
    /// to the same key. Every other kind returns `None`.
    pub fn as_key(&self) -> Option<String> {
        match self {
            Value::Text(text) => Some(text.clone()),
            Value::Number(number) if number.fract() == 0.0 && number.is_finite() => {
                // Formatted directly so magnitudes beyond i64 keep distinct
                // key strings; negative zero canonicalizes to "0".
                let number = if *number == 0.0 { 0.0 } else { *number };
                Some(format!("{number:.0}"))
            }
            _ => None,
        }
    }

    /// Returns the text content if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` if this value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Instant(a), Value::Instant(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
            (Value::Instant(a), Value::Instant(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Instant(value)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn kinds_fold_bool_and_null_into_other() {
        assert_eq!(Value::from("a").kind(), ValueKind::Text);
        assert_eq!(Value::from(1).kind(), ValueKind::Number);
        assert_eq!(Value::from(Utc::now()).kind(), ValueKind::Instant);
        assert_eq!(Value::from(true).kind(), ValueKind::Other);
        assert_eq!(Value::Null.kind(), ValueKind::Other);
    }

    #[test]
    fn cross_kind_values_are_unordered_and_unequal() {
        let text = Value::from("1");
        let number = Value::from(1);

        assert_ne!(text, number);
        assert!(text.partial_cmp(&number).is_none());
    }

    #[test]
    fn instants_compare_by_point_in_time() {
        let earlier = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(Value::from(earlier), Value::from(earlier));
        assert!(Value::from(earlier) < Value::from(later));
    }

    #[test]
    fn key_coercion_accepts_text_and_integral_numbers() {
        assert_eq!(Value::from("u-1").as_key().as_deref(), Some("u-1"));
        assert_eq!(Value::from(42).as_key().as_deref(), Some("42"));
        assert_eq!(Value::from(42.0).as_key().as_deref(), Some("42"));
        assert_eq!(Value::from(4.2).as_key(), None);
        assert_eq!(Value::from(true).as_key(), None);
        assert_eq!(Value::Null.as_key(), None);
    }

    #[test]
    fn key_coercion_keeps_large_integral_numbers_distinct() {
        let a = Value::from(1e19).as_key().unwrap();
        let b = Value::from(2e19).as_key().unwrap();

        assert_ne!(a, b);
        assert_eq!(a, "10000000000000000000");
        assert_eq!(Value::from(-0.0).as_key().as_deref(), Some("0"));
        assert_eq!(Value::from(f64::INFINITY).as_key(), None);
        assert_eq!(Value::from(f64::NAN).as_key(), None);
    }
}
