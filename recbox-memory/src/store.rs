//! The in-memory record store engine.
//!
//! [`MemoryStore`] owns a single mapping from key to record and exposes CRUD
//! operations, listing and filtered queries with sort/offset/limit, page-based
//! pagination, and a snapshot-based transaction mechanism. Execution is
//! synchronous and single-threaded: every operation runs to completion on the
//! caller's thread, and exclusive mutation goes through `&mut self`.

use chrono::Utc;
use serde_json::json;
use std::{cmp::Ordering, collections::BTreeMap, fmt, sync::Arc};

use recbox_core::{
    error::{StoreError, StoreResult},
    log::{ConsoleLogger, Logger},
    page::{Page, PaginationParams},
    query::{ListOptions, Query, Sort, SortDirection},
    record::Record,
    value::Value,
};

use crate::{evaluator, txn::TransactionView};

/// An in-memory key-value record store.
///
/// Records are held in a map keyed by the value of the store's key field; the
/// map iterates in deterministic key order, which is the stable default order
/// of `list` and `query`. Queries scan all records (no indexing).
///
/// A [`Logger`] is injected at construction (defaulting to the
/// `tracing`-backed console logger); the store emits one event per mutating
/// operation. There is no global logging state.
///
/// # Example
///
/// ```ignore
/// use recbox::{record, memory::MemoryStore, query::Filter};
///
/// let mut store = MemoryStore::new("id");
///
/// let alice = store.create(record! { "name" => "Alice", "age" => 25 })?;
/// let thirties = store.query(&Filter::between("age", 30, 40).into());
/// # Ok::<(), recbox::error::StoreError>(())
/// ```
pub struct MemoryStore {
    /// key-field value -> record; every record holds its own key under
    /// `key_field`.
    records: BTreeMap<String, Record>,
    key_field: String,
    /// Monotonic counter combined with a timestamp for generated keys.
    next_key: u64,
    logger: Arc<dyn Logger>,
}

impl MemoryStore {
    /// Creates a store with the given key field name and the default
    /// console logger.
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            records: BTreeMap::new(),
            key_field: key_field.into(),
            next_key: 0,
            logger: Arc::new(ConsoleLogger),
        }
    }

    /// Creates a builder for constructing a store with custom options.
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::default()
    }

    /// The name of the field holding each record's unique key.
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Creates a record, resolving or generating its key.
    ///
    /// If the candidate's key field is absent, null, or not of a key-capable
    /// kind, a unique key is generated from a timestamp and a monotonic
    /// counter. Otherwise the candidate's key is used verbatim. The stored
    /// record always carries the resolved key under the key field.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the resolved key already
    /// exists; the check applies to generated keys too, and the store is left
    /// unchanged.
    pub fn create(&mut self, candidate: Record) -> StoreResult<Record> {
        let key = match candidate.get(&self.key_field).and_then(Value::as_key) {
            Some(key) => key,
            None => self.generate_key(),
        };

        if self.records.contains_key(&key) {
            return Err(StoreError::DuplicateKey(key));
        }

        let mut record = candidate;
        record.insert(self.key_field.clone(), key.clone());
        self.records.insert(key.clone(), record.clone());

        self.logger
            .info("record.created", json!({ "key": key, "record": record }));

        Ok(record)
    }

    /// Returns the record stored under `key`, or `None`. Never fails.
    pub fn get(&self, key: &str) -> Option<Record> {
        let record = self.records.get(key).cloned();

        self.logger.debug(
            "record.fetched",
            json!({ "key": key, "found": record.is_some() }),
        );

        record
    }

    /// Shallow-merges a patch over the record stored under `key`.
    ///
    /// Patch fields win over existing ones; the key field is stripped from
    /// the patch, so the stored key is always preserved. The updated record
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists under `key`.
    pub fn update(&mut self, key: &str, mut patch: Record) -> StoreResult<Record> {
        patch.remove(&self.key_field);

        let Some(existing) = self.records.get_mut(key) else {
            return Err(StoreError::NotFound(key.to_string()));
        };

        existing.merge(patch.clone());
        let updated = existing.clone();

        self.logger
            .info("record.updated", json!({ "key": key, "patch": patch }));

        Ok(updated)
    }

    /// Removes the record stored under `key`, reporting whether one existed.
    /// Deleting an absent key is a no-op. Never fails.
    pub fn delete(&mut self, key: &str) -> bool {
        let existed = self.records.remove(key).is_some();

        self.logger
            .info("record.deleted", json!({ "key": key, "existed": existed }));

        existed
    }

    /// Returns all records, sorted and sliced per the options.
    ///
    /// Without a sort field, records come back in the store's stable key
    /// order. Offset defaults to 0 and limit to the full remaining length; a
    /// slice past the end is empty, never an error.
    pub fn list(&self, options: &ListOptions) -> Vec<Record> {
        let records = self.records.values().cloned().collect();

        apply_options(records, options)
    }

    /// Returns the records matching the query's filter, then applies the same
    /// sort/offset/limit pipeline as [`MemoryStore::list`]. An absent filter
    /// matches every record.
    pub fn query(&self, query: &Query) -> Vec<Record> {
        let matched = evaluator::filter_records(self.records.values(), query.filter.as_ref());

        apply_options(matched, &query.options)
    }

    /// Returns one page of all records, in stable key order.
    pub fn list_page(&self, params: &PaginationParams) -> Page<Record> {
        params.paginate(self.list(&ListOptions::default()))
    }

    /// Returns one page of the records matching the query's filter, ordered
    /// by the query's sort. The query's own offset and limit are superseded
    /// by the page parameters.
    pub fn query_page(&self, query: &Query, params: &PaginationParams) -> Page<Record> {
        let matched = evaluator::filter_records(self.records.values(), query.filter.as_ref());
        let ordered = apply_options(
            matched,
            &ListOptions {
                sort: query.options.sort.clone(),
                ..ListOptions::default()
            },
        );

        params.paginate(ordered)
    }

    /// Removes every record unconditionally. Never fails.
    pub fn clear(&mut self) {
        let removed = self.records.len();
        self.records.clear();

        self.logger.info("store.cleared", json!({ "removed": removed }));
    }

    /// Runs `body` inside a snapshot-based transaction.
    ///
    /// The whole key-record map is copied up front, and `body` receives a
    /// [`TransactionView`] whose operations mutate this store live; there is
    /// no separate apply step. If `body` returns `Ok`, its mutations stand
    /// and its value is returned. If it returns `Err`, the map is restored
    /// wholesale from the snapshot, an error event is emitted, and the
    /// original error is returned unchanged.
    ///
    /// The view does not expose `transaction`, and this method holds the
    /// store exclusively, so transactions cannot nest.
    ///
    /// # Example
    ///
    /// ```ignore
    /// store.transaction(|tx| {
    ///     tx.create(record! { "name" => "Bob" })?;
    ///     tx.update("t1", record! { "done" => true })?;
    ///     Ok::<_, StoreError>(())
    /// })?;
    /// ```
    pub fn transaction<T, E, F>(&mut self, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut TransactionView<'_>) -> Result<T, E>,
        E: fmt::Display,
    {
        let snapshot = self.records.clone();

        let result = {
            let mut view = TransactionView::new(self);
            body(&mut view)
        };

        match result {
            Ok(value) => Ok(value),
            Err(error) => {
                self.records = snapshot;
                self.logger.error(
                    "transaction.rolled_back",
                    json!({ "error": error.to_string() }),
                );

                Err(error)
            }
        }
    }

    fn generate_key(&mut self) -> String {
        let key = format!("{}-{}", Utc::now().timestamp_millis(), self.next_key);
        self.next_key += 1;

        key
    }
}

impl Default for MemoryStore {
    /// A store keyed on `"id"` with the default console logger.
    fn default() -> Self {
        Self::new("id")
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("key_field", &self.key_field)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

/// Sorts and slices a result set per the options. Shared by `list` and
/// `query`.
fn apply_options(mut records: Vec<Record>, options: &ListOptions) -> Vec<Record> {
    if let Some(sort) = &options.sort {
        sort_records(&mut records, sort);
    }

    records
        .into_iter()
        .skip(options.offset.unwrap_or(0))
        .take(options.limit.unwrap_or(usize::MAX))
        .collect()
}

/// Stable sort on one field's value. Missing or incomparable values compare
/// equal and keep their relative order.
fn sort_records(records: &mut [Record], sort: &Sort) {
    records.sort_by(|a, b| {
        let ordering = match (a.get(&sort.field), b.get(&sort.field)) {
            (Some(left), Some(right)) => left.partial_cmp(right).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        };

        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Builder for constructing [`MemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use recbox::{memory::MemoryStore, log::NoopLogger};
/// use std::sync::Arc;
///
/// let store = MemoryStore::builder()
///     .key_field("task_id")
///     .logger(Arc::new(NoopLogger))
///     .build();
/// ```
pub struct MemoryStoreBuilder {
    key_field: String,
    logger: Option<Arc<dyn Logger>>,
}

impl Default for MemoryStoreBuilder {
    fn default() -> Self {
        Self {
            key_field: "id".to_string(),
            logger: None,
        }
    }
}

impl MemoryStoreBuilder {
    /// Sets the name of the key field (default `"id"`).
    pub fn key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    /// Sets the logger the store emits events through (default:
    /// [`ConsoleLogger`]).
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds and returns the store. Construction cannot fail.
    pub fn build(self) -> MemoryStore {
        MemoryStore {
            records: BTreeMap::new(),
            key_field: self.key_field,
            next_key: 0,
            logger: self.logger.unwrap_or_else(|| Arc::new(ConsoleLogger)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recbox_core::{log::NoopLogger, record};

    fn quiet_store() -> MemoryStore {
        MemoryStore::builder().logger(Arc::new(NoopLogger)).build()
    }

    #[test]
    fn generated_keys_are_unique_across_calls() {
        let mut store = quiet_store();

        let a = store.create(record! { "n" => 1 }).unwrap();
        let b = store.create(record! { "n" => 2 }).unwrap();

        assert_ne!(a.get("id"), b.get("id"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn create_writes_resolved_key_into_the_record() {
        let mut store = quiet_store();

        let created = store
            .create(record! { "id" => "u-1", "name" => "Alice" })
            .unwrap();

        assert_eq!(created.get("id"), Some(&Value::from("u-1")));
        assert!(store.get("u-1").is_some());
    }

    #[test]
    fn duplicate_key_leaves_store_unchanged() {
        let mut store = quiet_store();
        store.create(record! { "id" => "u-1", "name" => "Alice" }).unwrap();

        let err = store
            .create(record! { "id" => "u-1", "name" => "Imposter" })
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateKey(key) if key == "u-1"));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("u-1").unwrap().get("name"),
            Some(&Value::from("Alice"))
        );
    }

    #[test]
    fn integral_number_keys_resolve_to_canonical_strings() {
        let mut store = quiet_store();

        let created = store.create(record! { "id" => 42, "name" => "Answer" }).unwrap();

        assert_eq!(created.get("id"), Some(&Value::from("42")));
        assert!(store.get("42").is_some());
    }

    #[test]
    fn null_key_field_falls_back_to_generation() {
        let mut store = quiet_store();

        let created = store
            .create(record! { "id" => Value::Null, "name" => "Nobody" })
            .unwrap();

        let key = created.get("id").and_then(Value::as_key).unwrap();
        assert!(store.get(&key).is_some());
    }

    #[test]
    fn builder_configures_key_field() {
        let mut store = MemoryStore::builder()
            .key_field("task_id")
            .logger(Arc::new(NoopLogger))
            .build();

        let created = store.create(record! { "title" => "write tests" }).unwrap();

        assert!(created.contains_field("task_id"));
        assert!(!created.contains_field("id"));
    }
}
