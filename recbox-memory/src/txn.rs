//! Transaction view handed to transaction bodies.

use recbox_core::{
    error::StoreResult,
    query::{ListOptions, Query},
    record::Record,
};

use crate::store::MemoryStore;

/// A delegating facade over the store, live for one transaction body.
///
/// Every operation forwards directly to the underlying [`MemoryStore`], so
/// mutations are immediately visible; the commit is implicit and rollback is
/// handled by [`MemoryStore::transaction`] from its snapshot. The view holds
/// no state of its own.
///
/// The view deliberately does not expose `transaction`: together with the
/// store being exclusively borrowed for the body's duration, this makes
/// nested transactions a compile error rather than an unspecified behavior.
#[derive(Debug)]
pub struct TransactionView<'a> {
    store: &'a mut MemoryStore,
}

impl<'a> TransactionView<'a> {
    pub(crate) fn new(store: &'a mut MemoryStore) -> Self {
        Self { store }
    }

    /// Creates a record; see [`MemoryStore::create`].
    pub fn create(&mut self, candidate: Record) -> StoreResult<Record> {
        self.store.create(candidate)
    }

    /// Fetches a record by key; see [`MemoryStore::get`].
    pub fn get(&self, key: &str) -> Option<Record> {
        self.store.get(key)
    }

    /// Patches a record; see [`MemoryStore::update`].
    pub fn update(&mut self, key: &str, patch: Record) -> StoreResult<Record> {
        self.store.update(key, patch)
    }

    /// Deletes a record; see [`MemoryStore::delete`].
    pub fn delete(&mut self, key: &str) -> bool {
        self.store.delete(key)
    }

    /// Lists records; see [`MemoryStore::list`].
    pub fn list(&self, options: &ListOptions) -> Vec<Record> {
        self.store.list(options)
    }

    /// Queries records; see [`MemoryStore::query`].
    pub fn query(&self, query: &Query) -> Vec<Record> {
        self.store.query(query)
    }
}
