//! Filter expression evaluation against in-memory records.
//!
//! The evaluator walks a filter tree and decides, per record, whether the
//! record matches. Which operators in a field's operator set are consulted is
//! decided by the *runtime* kind of the record's value, not by anything
//! declared in the filter; operators that do not apply to that kind are
//! skipped, and every applicable operator must hold.

use recbox_core::{
    query::{Expr, FieldOp, QueryVisitor},
    record::Record,
    value::{Value, ValueKind},
};
use std::cmp::Ordering;

/// Evaluates filter expressions against a single record.
pub(crate) struct RecordEvaluator<'a> {
    record: &'a Record,
}

impl<'a> RecordEvaluator<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self { record }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> bool {
        self.visit_expr(expr)
    }
}

/// Returns `true` if the record matches the filter. An absent filter matches
/// every record.
pub fn matches(record: &Record, filter: Option<&Expr>) -> bool {
    match filter {
        Some(expr) => RecordEvaluator::new(record).evaluate(expr),
        None => true,
    }
}

/// Filters an iterator of records down to those matching the filter.
pub fn filter_records<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    filter: Option<&Expr>,
) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| matches(record, filter))
        .cloned()
        .collect()
}

impl<'a> QueryVisitor for RecordEvaluator<'a> {
    type Output = bool;

    fn visit_and(&mut self, exprs: &[Expr]) -> bool {
        for expr in exprs {
            if !self.visit_expr(expr) {
                return false;
            }
        }

        true
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> bool {
        for expr in exprs {
            if self.visit_expr(expr) {
                return true;
            }
        }

        false
    }

    fn visit_field(&mut self, field: &str, ops: &[FieldOp]) -> bool {
        let value = self.record.get(field);
        let kind = value.map(Value::kind).unwrap_or(ValueKind::Other);

        for op in ops {
            // `None` means the operator does not apply to this value kind
            // and is skipped; `Some(false)` fails the whole match.
            if check_op(kind, value, op) == Some(false) {
                return false;
            }
        }

        true
    }
}

/// Checks one operator against a field value of the given runtime kind.
fn check_op(kind: ValueKind, value: Option<&Value>, op: &FieldOp) -> Option<bool> {
    match kind {
        ValueKind::Text => {
            let text = value.and_then(Value::as_text)?;

            match op {
                FieldOp::Eq(operand) => Some(value == Some(operand)),
                FieldOp::Contains(sub) => Some(text.contains(sub.as_str())),
                FieldOp::StartsWith(prefix) => Some(text.starts_with(prefix.as_str())),
                FieldOp::EndsWith(suffix) => Some(text.ends_with(suffix.as_str())),
                _ => None,
            }
        }
        ValueKind::Number => {
            let number = value?;

            match op {
                FieldOp::Eq(operand) => Some(number == operand),
                FieldOp::Lt(operand) => Some(cmp_is(number, operand, [Ordering::Less])),
                FieldOp::Lte(operand) => {
                    Some(cmp_is(number, operand, [Ordering::Less, Ordering::Equal]))
                }
                FieldOp::Gt(operand) => Some(cmp_is(number, operand, [Ordering::Greater])),
                FieldOp::Gte(operand) => {
                    Some(cmp_is(number, operand, [Ordering::Greater, Ordering::Equal]))
                }
                FieldOp::Between(low, high) => Some(
                    cmp_is(number, low, [Ordering::Greater, Ordering::Equal])
                        && cmp_is(number, high, [Ordering::Less, Ordering::Equal]),
                ),
                _ => None,
            }
        }
        ValueKind::Instant => {
            let instant = value?;

            match op {
                FieldOp::Eq(operand) => Some(instant == operand),
                FieldOp::Before(operand) => Some(cmp_is(instant, operand, [Ordering::Less])),
                FieldOp::After(operand) => Some(cmp_is(instant, operand, [Ordering::Greater])),
                FieldOp::Between(low, high) => Some(
                    cmp_is(instant, low, [Ordering::Greater, Ordering::Equal])
                        && cmp_is(instant, high, [Ordering::Less, Ordering::Equal]),
                ),
                _ => None,
            }
        }
        // Booleans, null and missing fields only answer to strict equality;
        // a missing field never equals anything.
        ValueKind::Other => match op {
            FieldOp::Eq(operand) => Some(value.is_some_and(|v| v == operand)),
            _ => None,
        },
    }
}

/// Three-way-compares a field value with an operand and reports whether the
/// ordering is one of the accepted ones. Incomparable values (different
/// kinds) fail the check.
fn cmp_is<const N: usize>(left: &Value, right: &Value, accepted: [Ordering; N]) -> bool {
    match left.partial_cmp(right) {
        Some(ordering) => accepted.contains(&ordering),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use recbox_core::{
        query::{Field, Filter},
        record,
    };

    fn people() -> Vec<Record> {
        vec![
            record! { "name" => "Alice", "age" => 25, "city" => "Paris" },
            record! { "name" => "Bob", "age" => 35, "city" => "London" },
            record! { "name" => "Charlie", "age" => 45, "city" => "Berlin" },
        ]
    }

    #[test]
    fn absent_filter_matches_everything() {
        let records = people();

        assert_eq!(filter_records(&records, None).len(), 3);
    }

    #[test]
    fn numeric_between_is_inclusive() {
        let records = people();
        let matched = filter_records(&records, Some(&Filter::between("age", 30, 40)));

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].get("name"), Some(&Value::from("Bob")));

        let edges = filter_records(&records, Some(&Filter::between("age", 25, 45)));
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn or_group_matches_union_without_duplicates() {
        let records = people();
        let filter = Filter::or([Filter::eq("city", "London"), Filter::gt("age", 40)]);
        let matched = filter_records(&records, Some(&filter));

        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn and_group_requires_every_branch() {
        let records = people();
        let filter = Filter::and([Filter::gt("age", 20), Filter::eq("city", "Paris")]);
        let matched = filter_records(&records, Some(&filter));

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].get("name"), Some(&Value::from("Alice")));
    }

    #[test]
    fn text_operators_all_apply() {
        let record = record! { "name" => "Charlie" };

        assert!(matches(&record, Some(&Filter::contains("name", "har"))));
        assert!(matches(&record, Some(&Filter::starts_with("name", "Ch"))));
        assert!(matches(&record, Some(&Filter::ends_with("name", "lie"))));
        assert!(!matches(&record, Some(&Filter::contains("name", "xyz"))));
    }

    #[test]
    fn operator_set_on_one_field_is_all_anded() {
        let record = record! { "name" => "Charlie" };
        let filter = Filter::field(
            "name",
            [
                FieldOp::StartsWith("Ch".to_string()),
                FieldOp::EndsWith("nope".to_string()),
            ],
        );

        assert!(!matches(&record, Some(&filter)));
    }

    #[test]
    fn dispatch_follows_runtime_kind_not_operator_choice() {
        // A substring operator aimed at a numeric value does not apply and
        // is skipped, so the leaf still matches.
        let record = record! { "age" => 35 };
        let filter = Filter::contains("age", "3");

        assert!(matches(&record, Some(&filter)));
    }

    #[test]
    fn instants_compare_strictly_for_before_and_after() {
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let record = record! { "created_at" => t2 };

        assert!(matches(&record, Some(&Field::instant("created_at").after(t1))));
        assert!(!matches(&record, Some(&Field::instant("created_at").after(t2))));
        assert!(!matches(&record, Some(&Field::instant("created_at").before(t2))));
        assert!(matches(&record, Some(&Field::instant("created_at").between(t1, t2))));
        assert!(matches(&record, Some(&Field::instant("created_at").eq(t2))));
    }

    #[test]
    fn missing_field_only_answers_eq_and_never_matches_it() {
        let record = record! { "name" => "Alice" };

        assert!(!matches(&record, Some(&Filter::eq("city", "Paris"))));
        // Non-eq operators on a missing field do not apply, so the leaf passes.
        assert!(matches(&record, Some(&Filter::gt("city", 1))));
    }

    #[test]
    fn booleans_match_by_strict_equality_only() {
        let record = record! { "active" => true };

        assert!(matches(&record, Some(&Filter::eq("active", true))));
        assert!(!matches(&record, Some(&Filter::eq("active", false))));
        // Ordered comparison on a boolean does not apply.
        assert!(matches(&record, Some(&Filter::gt("active", false))));
    }

    #[test]
    fn empty_operator_set_matches() {
        let record = record! { "name" => "Alice" };

        assert!(matches(&record, Some(&Filter::field("name", []))));
    }
}
