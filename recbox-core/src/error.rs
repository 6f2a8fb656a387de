//! Error and result types for store operations.
//!
//! Only two operations can fail: `create` on a key collision, and `update` on
//! a missing key. Everything else is total and reports through `Option`,
//! `bool` or an empty sequence instead.

use thiserror::Error;

/// Errors raised by record store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record with the resolved key already exists in the store.
    #[error("a record with key '{0}' already exists")]
    DuplicateKey(String),
    /// No record exists under the given key.
    #[error("no record found for key '{0}'")]
    NotFound(String),
}

/// A specialized `Result` type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;
