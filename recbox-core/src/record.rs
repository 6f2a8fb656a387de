//! Record representation: an open set of named field values.
//!
//! A [`Record`] is the unit of storage. It carries arbitrary named fields of
//! any [`Value`] kind; one designated field (the store's key field) holds the
//! record's unique lookup key. Fields iterate in a deterministic order.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::value::Value;

/// A structured value with named fields, stored under its key-field value.
///
/// Records are open-ended: any field name may map to any [`Value`] kind. The
/// store treats one field name as the key field, but `Record` itself is
/// agnostic to which.
///
/// # Example
///
/// ```ignore
/// use recbox::record;
///
/// let alice = record! {
///     "name" => "Alice",
///     "age" => 25,
/// };
///
/// assert_eq!(alice.get("name").and_then(|v| v.as_text()), Some("Alice"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a new record with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of the named field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Sets a field to the given value, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(field.into(), value.into());

        self
    }

    /// Removes a field, returning its previous value if it was present.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Returns `true` if the named field is present.
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Shallow-merges another record's fields over this one.
    ///
    /// Fields from `patch` win on conflict; fields only present here are left
    /// untouched. This is the merge used by the store's `update` operation.
    pub fn merge(&mut self, patch: Record) {
        for (field, value) in patch.fields {
            self.fields.insert(field, value);
        }
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in deterministic (name) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Builds a [`Record`] from `field => value` pairs.
///
/// Values go through `Into<Value>`, so plain literals work for text, numbers
/// and booleans, and `chrono::DateTime<Utc>` works for instants.
///
/// # Example
///
/// ```ignore
/// use recbox::record;
///
/// let bob = record! {
///     "name" => "Bob",
///     "age" => 35,
///     "active" => true,
/// };
/// ```
#[macro_export]
macro_rules! record {
    () => { $crate::record::Record::new() };
    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::record::Record::new();
        $(record.insert($field, $value);)+
        record
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_and_keeps_untouched_fields() {
        let mut base = record! { "name" => "Alice", "age" => 25 };
        let patch = record! { "age" => 26, "city" => "London" };

        base.merge(patch);

        assert_eq!(base.get("name"), Some(&Value::from("Alice")));
        assert_eq!(base.get("age"), Some(&Value::from(26)));
        assert_eq!(base.get("city"), Some(&Value::from("London")));
    }

    #[test]
    fn record_macro_builds_fields() {
        let rec = record! { "name" => "Bob", "active" => true };

        assert_eq!(rec.len(), 2);
        assert!(rec.contains_field("active"));
        assert!(record!().is_empty());
    }

    #[test]
    fn fields_iterate_in_name_order() {
        let rec = record! { "b" => 2, "a" => 1, "c" => 3 };
        let names: Vec<&str> = rec.iter().map(|(name, _)| name).collect();

        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
