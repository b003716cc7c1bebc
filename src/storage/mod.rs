//! Key-value persistence capability.
//!
//! The history is stored as one serialized blob per key. Backends only need
//! `get`, `set` and `delete`; all three are asynchronous so a backend may do
//! real I/O without blocking the caller's task.

pub mod memory_store;
pub mod sqlite_store;

use async_trait::async_trait;

use crate::types::errors::StorageError;

pub use memory_store::MemoryKeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the blob stored under `key`, or `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous blob.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    async fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key).await?.is_some())
    }
}
