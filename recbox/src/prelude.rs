//! Convenient re-exports of commonly used types.
//!
//! Import this prelude to access the usual working set without reaching into
//! sub-modules:
//!
//! ```ignore
//! use recbox::prelude::*;
//! ```

pub use recbox_core::{
    error::{StoreError, StoreResult},
    log::{ConsoleLogger, Logger, NoopLogger},
    page::{Page, PaginationParams},
    query::{
        Expr, Field, FieldOp, Filter, ListOptions, Query, QueryBuilder, QueryVisitor, Sort,
        SortDirection,
    },
    record::Record,
    value::{Value, ValueKind},
};

pub use recbox_memory::{MemoryStore, MemoryStoreBuilder, TransactionView};
