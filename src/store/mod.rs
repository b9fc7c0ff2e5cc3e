//! The storage seam: a generic, durable, string-keyed store.

mod memory;

pub use memory::MemoryStore;

use crate::error::StorageError;

/// A generic async key-value store, such as a mobile device's persistent
/// storage.
///
/// The store offers no transactions, no schema enforcement, and no
/// compare-and-swap; the ledger serializes a user's full record sequence as
/// the value at a single key. An absent key is `Ok(None)`, never an error.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored at `key`, or `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value at `key` in full. A write either completes as a
    /// full replacement or does not happen at all.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
