//! Query construction and filtering API for the record store.
//!
//! This module provides filter expression trees, sorting and pagination
//! options, and a visitor used by the evaluator to walk expressions.
//!
//! # Query building
//!
//! Queries are constructed with the fluent builder API:
//!
//! ```ignore
//! use recbox::query::{Query, Filter, SortDirection};
//!
//! let query = Query::builder()
//!     .filter(Filter::between("age", 30, 40))
//!     .sort("age", SortDirection::Asc)
//!     .limit(10)
//!     .build();
//! ```
//!
//! # Filter expressions
//!
//! A filter is a tree: leaves pair a field name with a set of operators, all
//! of which must hold; `And`/`Or` nodes combine sub-expressions. The
//! [`Filter`] namespace builds leaves and groups directly, while the
//! [`Field`] selectors expose only the operators legal for a declared value
//! kind:
//!
//! ```ignore
//! use recbox::query::{Field, Filter};
//!
//! // Free-form: any operator on any field.
//! let a = Filter::contains("name", "li").and(Filter::gt("age", 18));
//!
//! // Kind-checked at the call site: no `contains` on a number field.
//! let b = Field::number("age").between(30, 40);
//! ```

use crate::value::Value;

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    Desc,
}

/// Sort specification: which field to sort by, and in which direction.
#[derive(Debug, Clone)]
pub struct Sort {
    /// The field name to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// A single field comparison: an operator together with its operand.
///
/// Which operators actually apply to a record field is decided by the
/// evaluator from the *runtime* kind of the stored value; operators that do
/// not apply to that kind are skipped.
#[derive(Debug, Clone)]
pub enum FieldOp {
    /// Exact match, for any value kind.
    Eq(Value),
    /// Text contains the given substring.
    Contains(String),
    /// Text starts with the given prefix.
    StartsWith(String),
    /// Text ends with the given suffix.
    EndsWith(String),
    /// Number strictly less than the operand.
    Lt(Value),
    /// Number less than or equal to the operand.
    Lte(Value),
    /// Number strictly greater than the operand.
    Gt(Value),
    /// Number greater than or equal to the operand.
    Gte(Value),
    /// Number or instant within the inclusive range `[low, high]`.
    Between(Value, Value),
    /// Instant strictly before the operand.
    Before(Value),
    /// Instant strictly after the operand.
    After(Value),
}

/// A filter expression over record fields.
///
/// Leaves carry a field name and its operator set (all operators must hold);
/// `And` and `Or` nodes combine sub-expressions. An absent filter matches
/// every record, and so does a leaf with an empty operator set.
///
/// # Example
///
/// ```ignore
/// use recbox::query::Filter;
///
/// let expr = Filter::or([
///     Filter::eq("city", "London"),
///     Filter::gt("age", 40),
/// ]);
/// ```
#[derive(Debug, Clone)]
pub enum Expr {
    /// Logical AND of sub-expressions (all must match).
    And(Vec<Expr>),
    /// Logical OR of sub-expressions (at least one must match).
    Or(Vec<Expr>),
    /// A field with its operator set.
    Field {
        /// The field name to compare.
        field: String,
        /// The operators to check, all of which must hold.
        ops: Vec<FieldOp>,
    },
}

impl Expr {
    /// Creates a field leaf with the given operator set.
    pub fn field(field: impl Into<String>, ops: Vec<FieldOp>) -> Self {
        Expr::Field { field: field.into(), ops }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the group. Otherwise, a new AND group is created.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }

    /// Combines this expression with another using logical OR.
    ///
    /// If this expression is already an OR, the other expression is appended
    /// to the group. Otherwise, a new OR group is created.
    pub fn or(self, other: Expr) -> Self {
        match self {
            Expr::Or(mut list) => {
                list.push(other);
                Expr::Or(list)
            }
            _ => Expr::Or(vec![self, other]),
        }
    }
}

/// Helper namespace for constructing filter expressions.
///
/// Each method builds a single-operator leaf; leaves combine with the
/// chainable [`Expr::and`]/[`Expr::or`] or the grouping [`Filter::and`] and
/// [`Filter::or`]. For operator sets checked against a declared value kind at
/// compile time, see [`Field`].
pub struct Filter;

impl Filter {
    /// Matches records where the field equals the value exactly.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::field(field, vec![FieldOp::Eq(value.into())])
    }

    /// Matches records where the text field contains the substring.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Expr {
        Expr::field(field, vec![FieldOp::Contains(value.into())])
    }

    /// Matches records where the text field starts with the prefix.
    pub fn starts_with(field: impl Into<String>, value: impl Into<String>) -> Expr {
        Expr::field(field, vec![FieldOp::StartsWith(value.into())])
    }

    /// Matches records where the text field ends with the suffix.
    pub fn ends_with(field: impl Into<String>, value: impl Into<String>) -> Expr {
        Expr::field(field, vec![FieldOp::EndsWith(value.into())])
    }

    /// Matches records where the numeric field is strictly less than the value.
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::field(field, vec![FieldOp::Lt(value.into())])
    }

    /// Matches records where the numeric field is at most the value.
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::field(field, vec![FieldOp::Lte(value.into())])
    }

    /// Matches records where the numeric field is strictly greater than the value.
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::field(field, vec![FieldOp::Gt(value.into())])
    }

    /// Matches records where the numeric field is at least the value.
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::field(field, vec![FieldOp::Gte(value.into())])
    }

    /// Matches records where the numeric or instant field lies in the
    /// inclusive range `[low, high]`.
    pub fn between(
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Expr {
        Expr::field(field, vec![FieldOp::Between(low.into(), high.into())])
    }

    /// Matches records where the instant field is strictly before the value.
    pub fn before(field: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::field(field, vec![FieldOp::Before(value.into())])
    }

    /// Matches records where the instant field is strictly after the value.
    pub fn after(field: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::field(field, vec![FieldOp::After(value.into())])
    }

    /// Creates a field leaf with an explicit operator set, all of which must
    /// hold.
    pub fn field(field: impl Into<String>, ops: impl IntoIterator<Item = FieldOp>) -> Expr {
        Expr::field(field, ops.into_iter().collect())
    }

    /// Groups expressions so that all must match.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }

    /// Groups expressions so that at least one must match.
    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Or(exprs.into_iter().collect())
    }
}

/// Entry point for kind-checked field selectors.
///
/// A selector fixes the value kind a field is expected to hold and exposes
/// only the operators legal for that kind, so an illegal pairing (say,
/// `contains` on a number) is a compile error rather than a silently skipped
/// operator.
///
/// # Example
///
/// ```ignore
/// use recbox::query::Field;
///
/// let adults = Field::number("age").gte(18);
/// let londoners = Field::text("city").eq("London");
/// ```
pub struct Field;

impl Field {
    /// Selects a field expected to hold text.
    pub fn text(name: impl Into<String>) -> TextField {
        TextField { name: name.into() }
    }

    /// Selects a field expected to hold a number.
    pub fn number(name: impl Into<String>) -> NumberField {
        NumberField { name: name.into() }
    }

    /// Selects a field expected to hold an instant.
    pub fn instant(name: impl Into<String>) -> InstantField {
        InstantField { name: name.into() }
    }
}

/// Selector for text fields: equality and substring operators.
pub struct TextField {
    name: String,
}

impl TextField {
    /// Matches when the field equals the text exactly.
    pub fn eq(self, value: impl Into<String>) -> Expr {
        Expr::field(self.name, vec![FieldOp::Eq(Value::Text(value.into()))])
    }

    /// Matches when the field contains the substring.
    pub fn contains(self, value: impl Into<String>) -> Expr {
        Expr::field(self.name, vec![FieldOp::Contains(value.into())])
    }

    /// Matches when the field starts with the prefix.
    pub fn starts_with(self, value: impl Into<String>) -> Expr {
        Expr::field(self.name, vec![FieldOp::StartsWith(value.into())])
    }

    /// Matches when the field ends with the suffix.
    pub fn ends_with(self, value: impl Into<String>) -> Expr {
        Expr::field(self.name, vec![FieldOp::EndsWith(value.into())])
    }
}

/// Selector for numeric fields: equality and ordered comparisons.
pub struct NumberField {
    name: String,
}

impl NumberField {
    /// Matches when the field equals the number exactly.
    pub fn eq(self, value: f64) -> Expr {
        Expr::field(self.name, vec![FieldOp::Eq(Value::Number(value))])
    }

    /// Matches when the field is strictly less than the number.
    pub fn lt(self, value: f64) -> Expr {
        Expr::field(self.name, vec![FieldOp::Lt(Value::Number(value))])
    }

    /// Matches when the field is at most the number.
    pub fn lte(self, value: f64) -> Expr {
        Expr::field(self.name, vec![FieldOp::Lte(Value::Number(value))])
    }

    /// Matches when the field is strictly greater than the number.
    pub fn gt(self, value: f64) -> Expr {
        Expr::field(self.name, vec![FieldOp::Gt(Value::Number(value))])
    }

    /// Matches when the field is at least the number.
    pub fn gte(self, value: f64) -> Expr {
        Expr::field(self.name, vec![FieldOp::Gte(Value::Number(value))])
    }

    /// Matches when the field lies in the inclusive range `[low, high]`.
    pub fn between(self, low: f64, high: f64) -> Expr {
        Expr::field(
            self.name,
            vec![FieldOp::Between(Value::Number(low), Value::Number(high))],
        )
    }
}

/// Selector for instant fields: equality and temporal comparisons.
pub struct InstantField {
    name: String,
}

impl InstantField {
    /// Matches when the field equals the instant exactly.
    pub fn eq(self, value: chrono::DateTime<chrono::Utc>) -> Expr {
        Expr::field(self.name, vec![FieldOp::Eq(Value::Instant(value))])
    }

    /// Matches when the field is strictly before the instant.
    pub fn before(self, value: chrono::DateTime<chrono::Utc>) -> Expr {
        Expr::field(self.name, vec![FieldOp::Before(Value::Instant(value))])
    }

    /// Matches when the field is strictly after the instant.
    pub fn after(self, value: chrono::DateTime<chrono::Utc>) -> Expr {
        Expr::field(self.name, vec![FieldOp::After(Value::Instant(value))])
    }

    /// Matches when the field lies in the inclusive range `[low, high]`.
    pub fn between(
        self,
        low: chrono::DateTime<chrono::Utc>,
        high: chrono::DateTime<chrono::Utc>,
    ) -> Expr {
        Expr::field(
            self.name,
            vec![FieldOp::Between(Value::Instant(low), Value::Instant(high))],
        )
    }
}

/// Ordering, offset and limit options shared by `list` and `query`.
///
/// Defaults match the store contract: no sort (stable map order), offset 0,
/// limit unbounded.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Maximum number of records to return.
    pub limit: Option<usize>,
    /// Number of records to skip from the start of the ordered result.
    pub offset: Option<usize>,
    /// Sort specification for results.
    pub sort: Option<Sort>,
}

impl ListOptions {
    /// Creates options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of records to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the number of records to skip.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the sort field and direction.
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort { field: field.into(), direction });
        self
    }
}

/// A structured query: an optional filter plus list options.
///
/// Use [`QueryBuilder`] for ergonomic construction. An empty query matches
/// and returns every record.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Optional filter expression to match records against.
    pub filter: Option<Expr>,
    /// Sort, offset and limit applied after filtering.
    pub options: ListOptions,
}

impl Query {
    /// Creates a new empty query that matches every record.
    pub fn new() -> Self {
        Query::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

impl From<Expr> for Query {
    fn from(filter: Expr) -> Self {
        Query {
            filter: Some(filter),
            options: ListOptions::default(),
        }
    }
}

/// Fluent builder for [`Query`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the filter expression for this query.
    pub fn filter(mut self, filter: Expr) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Sets the maximum number of records to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.options.limit = Some(limit);
        self
    }

    /// Sets the number of records to skip.
    pub fn offset(mut self, offset: usize) -> Self {
        self.query.options.offset = Some(offset);
        self
    }

    /// Sets the sort field and direction for the results.
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.query.options.sort = Some(Sort { field: field.into(), direction });
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query {
        self.query
    }
}

/// Visitor over filter expression trees.
///
/// Matching is total, so visit methods return `Self::Output` directly rather
/// than a result.
pub trait QueryVisitor {
    type Output;

    fn visit_and(&mut self, exprs: &[Expr]) -> Self::Output;
    fn visit_or(&mut self, exprs: &[Expr]) -> Self::Output;
    fn visit_field(&mut self, field: &str, ops: &[FieldOp]) -> Self::Output;

    fn visit_expr(&mut self, expr: &Expr) -> Self::Output {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Or(exprs) => self.visit_or(exprs),
            Expr::Field { field, ops } => self.visit_field(field, ops),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_and_appends_to_existing_group() {
        let expr = Filter::eq("a", 1)
            .and(Filter::eq("b", 2))
            .and(Filter::eq("c", 3));

        match expr {
            Expr::And(list) => assert_eq!(list.len(), 3),
            other => panic!("expected And group, got {other:?}"),
        }
    }

    #[test]
    fn chained_or_appends_to_existing_group() {
        let expr = Filter::eq("a", 1)
            .or(Filter::eq("b", 2))
            .or(Filter::eq("c", 3));

        match expr {
            Expr::Or(list) => assert_eq!(list.len(), 3),
            other => panic!("expected Or group, got {other:?}"),
        }
    }

    #[test]
    fn builder_assembles_all_parts() {
        let query = Query::builder()
            .filter(Filter::between("age", 30, 40))
            .sort("age", SortDirection::Desc)
            .offset(2)
            .limit(5)
            .build();

        assert!(query.filter.is_some());
        assert_eq!(query.options.limit, Some(5));
        assert_eq!(query.options.offset, Some(2));
        assert_eq!(query.options.sort.as_ref().map(|s| s.field.as_str()), Some("age"));
    }

    #[test]
    fn typed_selectors_produce_field_leaves() {
        let expr = Field::number("age").between(30.0, 40.0);

        match expr {
            Expr::Field { field, ops } => {
                assert_eq!(field, "age");
                assert!(matches!(ops.as_slice(), [FieldOp::Between(_, _)]));
            }
            other => panic!("expected field leaf, got {other:?}"),
        }
    }
}
