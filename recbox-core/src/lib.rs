//! Core types for the recbox record store.
//!
//! This crate provides:
//!
//! - **Field values** ([`value`]) - The closed set of value kinds a record field can hold
//! - **Records** ([`record`]) - Open-ended structured values with named fields
//! - **Query and filtering API** ([`query`]) - Composable filter expressions, sorting and slicing
//! - **Pagination** ([`page`]) - Page-based views over query results
//! - **Error handling** ([`error`]) - The two distinguished store error kinds
//! - **Logging** ([`log`]) - The injected event-logging capability
//!
//! The store engine itself lives in `recbox-memory`.
//!
//! # Example
//!
//! ```ignore
//! use recbox::{record, query::Filter};
//!
//! let alice = record! { "name" => "Alice", "age" => 25 };
//! let thirties = Filter::between("age", 30, 40);
//! ```

#[allow(unused_extern_crates)]
extern crate self as recbox_core;

pub mod error;
pub mod log;
pub mod page;
pub mod query;
pub mod record;
pub mod value;
