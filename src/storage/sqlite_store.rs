//! SQLite-backed key-value store.
//!
//! Blobs live in the `kv_store` table created by the v1 migration. Every call
//! hops onto the blocking pool, since `rusqlite` is synchronous.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::KeyValueStore;
use crate::database::connection::Database;
use crate::types::errors::StorageError;

pub struct SqliteKeyValueStore {
    db: Arc<Mutex<Database>>,
}

impl SqliteKeyValueStore {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = Database::open(path).map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(Self::new(db))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = Database::open_in_memory()
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(Self::new(db))
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Runs `op` against the connection on the blocking pool.
    async fn with_db<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let guard = db
                .lock()
                .map_err(|e| StorageError::DatabaseError(format!("connection lock poisoned: {}", e)))?;
            op(&guard).map_err(|e| StorageError::DatabaseError(e.to_string()))
        })
        .await
        .map_err(|e| StorageError::TaskFailed(e.to_string()))?
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = key.to_string();
        self.with_db(move |db| {
            db.connection()
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let key = key.to_string();
        let value = value.to_string();
        let now = Self::now();
        self.with_db(move |db| {
            db.connection().execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let key = key.to_string();
        self.with_db(move |db| {
            db.connection()
                .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
    }
}
