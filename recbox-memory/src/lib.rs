//! In-memory store engine for recbox.
//!
//! This crate provides the single-threaded, synchronous record store:
//!
//! - **Full CRUD** - Create with key generation, get, patch-style update, delete
//! - **Filtered queries** - Runtime-kind operator dispatch over the filter tree
//! - **Sorting and slicing** - Stable sort plus offset/limit and page views
//! - **Snapshot transactions** - Whole-map copy on start, wholesale restore on error
//!
//! # Quick start
//!
//! ```ignore
//! use recbox::{record, memory::MemoryStore, query::Filter};
//!
//! let mut store = MemoryStore::new("id");
//!
//! store.create(record! { "name" => "Alice", "age" => 25 })?;
//! store.create(record! { "name" => "Bob", "age" => 35 })?;
//!
//! let thirties = store.query(&Filter::between("age", 30, 40).into());
//! assert_eq!(thirties.len(), 1);
//! # Ok::<(), recbox::error::StoreError>(())
//! ```

#[allow(unused_extern_crates)]
extern crate self as recbox_memory;

pub mod evaluator;
pub mod store;
pub mod txn;

pub use evaluator::{filter_records, matches};
pub use store::{MemoryStore, MemoryStoreBuilder};
pub use txn::TransactionView;
