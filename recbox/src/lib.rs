//! recbox: an in-memory key-value record store with composable filter
//! queries, pagination/sorting, and snapshot-based transactions.
//!
//! This crate is the primary entry point. It re-exports the core types and
//! the in-memory store engine.
//!
//! # Features
//!
//! - **Open-ended records** - Arbitrary named fields of text, number, boolean
//!   and instant kinds; one designated key field, unique per store
//! - **Composable filters** - Per-field operator sets combined with AND/OR
//!   groups, matched by the runtime kind of each value
//! - **Sorting and pagination** - Stable sort, offset/limit slicing, and
//!   1-indexed page views
//! - **Snapshot transactions** - Run a closure against a transaction view;
//!   any error rolls the whole store back to its pre-transaction state
//! - **Injected logging** - A [`log::Logger`] capability passed at
//!   construction, no global state
//!
//! # Quick start
//!
//! ```ignore
//! use recbox::{prelude::*, record};
//!
//! let mut store = MemoryStore::new("id");
//!
//! store.create(record! { "name" => "Alice", "age" => 25, "city" => "Paris" })?;
//! store.create(record! { "name" => "Bob", "age" => 35, "city" => "London" })?;
//! store.create(record! { "name" => "Charlie", "age" => 45, "city" => "Berlin" })?;
//!
//! // Composable filters, matched at runtime by each value's kind.
//! let results = store.query(
//!     &Query::builder()
//!         .filter(Filter::or([
//!             Filter::eq("city", "London"),
//!             Filter::gt("age", 40),
//!         ]))
//!         .sort("age", SortDirection::Asc)
//!         .build(),
//! );
//! assert_eq!(results.len(), 2);
//!
//! // Snapshot transaction: the failed body leaves no trace.
//! let outcome: Result<(), StoreError> = store.transaction(|tx| {
//!     tx.create(record! { "name" => "Mallory" })?;
//!     Err(StoreError::NotFound("whoops".into()))
//! });
//! assert!(outcome.is_err());
//! assert_eq!(store.len(), 3);
//! # Ok::<(), recbox::error::StoreError>(())
//! ```
//!
//! # Typed filter construction
//!
//! The [`query::Field`] selectors fix a field's expected kind and expose only
//! the operators legal for it, moving operator validation to compile time:
//!
//! ```ignore
//! use recbox::query::Field;
//!
//! let expr = Field::text("name").starts_with("Al")
//!     .and(Field::number("age").between(20.0, 30.0));
//! ```

pub mod prelude;

pub use recbox_core::{error, log, page, query, record, value};

/// In-memory store engine.
pub mod memory {
    pub use recbox_memory::{MemoryStore, MemoryStoreBuilder, TransactionView};
}
