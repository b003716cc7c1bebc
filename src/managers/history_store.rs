//! History Store for QrScan.
//!
//! Implements `HistoryStoreTrait`: the whole scan log is kept as one JSON
//! array under a single key of a [`KeyValueStore`]. Appends are a
//! read-modify-write of that array, serialized by a per-store lock so two
//! appends through the same store never drop each other's record.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::storage::KeyValueStore;
use crate::types::errors::HistoryError;
use crate::types::scan::ScanRecord;
use crate::types::settings::{CorruptHistoryPolicy, HistorySettings, DEFAULT_HISTORY_KEY};

/// Trait defining scan history operations.
#[async_trait]
pub trait HistoryStoreTrait: Send + Sync {
    async fn load_all(&self) -> Result<Vec<ScanRecord>, HistoryError>;
    async fn append(&self, record: ScanRecord) -> Result<Vec<ScanRecord>, HistoryError>;
    async fn clear(&self) -> Result<(), HistoryError>;
}

/// Scan history persisted under one storage key.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    settings: HistorySettings,
    write_lock: Mutex<()>,
}

impl HistoryStore {
    /// Creates a store using the default key and settings.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_settings(store, DEFAULT_HISTORY_KEY, HistorySettings::default())
    }

    pub fn with_settings(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        settings: HistorySettings,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            settings,
            write_lock: Mutex::new(()),
        }
    }

    /// The storage key the history blob lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn settings(&self) -> &HistorySettings {
        &self.settings
    }

    /// Number of records `load_all` would currently return.
    pub async fn len(&self) -> Result<usize, HistoryError> {
        Ok(self.load_all().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.len().await? == 0)
    }

    /// Decodes a stored blob. An empty blob or a JSON `null` counts as no history.
    fn decode(blob: &str) -> Result<Vec<ScanRecord>, HistoryError> {
        if blob.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Option<Vec<ScanRecord>> =
            serde_json::from_str(blob).map_err(|e| HistoryError::CorruptData(e.to_string()))?;
        Ok(records.unwrap_or_default())
    }

    fn encode(records: &[ScanRecord]) -> Result<String, HistoryError> {
        serde_json::to_string(records).map_err(|e| HistoryError::SerializationError(e.to_string()))
    }

    /// Applies the corrupt-data policy to a decode failure.
    fn recover_corrupt(&self, err: HistoryError) -> Result<Vec<ScanRecord>, HistoryError> {
        match self.settings.on_corrupt {
            CorruptHistoryPolicy::TreatAsEmpty => {
                tracing::warn!(key = %self.key, error = %err, "stored history is corrupt, treating as empty");
                Ok(Vec::new())
            }
            CorruptHistoryPolicy::Fail => Err(err),
        }
    }

    fn enforce_cap(&self, records: &mut Vec<ScanRecord>) {
        if let Some(max) = self.settings.max_entries {
            let max = max.max(1);
            if records.len() > max {
                let excess = records.len() - max;
                records.drain(..excess);
                tracing::debug!(key = %self.key, dropped = excess, "history cap reached");
            }
        }
    }
}

#[async_trait]
impl HistoryStoreTrait for HistoryStore {
    /// Returns every record in scan order.
    ///
    /// A missing key is an empty history. Read failures and corrupt blobs are
    /// handled by the configured [`CorruptHistoryPolicy`].
    async fn load_all(&self) -> Result<Vec<ScanRecord>, HistoryError> {
        let blob = match self.store.get(&self.key).await {
            Ok(blob) => blob,
            Err(e) => {
                return match self.settings.on_corrupt {
                    CorruptHistoryPolicy::TreatAsEmpty => {
                        tracing::warn!(key = %self.key, error = %e, "failed to read history, treating as empty");
                        Ok(Vec::new())
                    }
                    CorruptHistoryPolicy::Fail => Err(e.into()),
                };
            }
        };

        match blob {
            None => Ok(Vec::new()),
            Some(blob) => Self::decode(&blob).or_else(|e| self.recover_corrupt(e)),
        }
    }

    /// Appends one record and writes the full list back. Returns the new list.
    ///
    /// Read failures are always returned here so an unreadable history is
    /// never overwritten.
    async fn append(&self, record: ScanRecord) -> Result<Vec<ScanRecord>, HistoryError> {
        let _guard = self.write_lock.lock().await;

        let mut records = match self.store.get(&self.key).await? {
            None => Vec::new(),
            Some(blob) => Self::decode(&blob).or_else(|e| self.recover_corrupt(e))?,
        };

        records.push(record);
        self.enforce_cap(&mut records);

        let encoded = Self::encode(&records)?;
        self.store.set(&self.key, &encoded).await?;

        tracing::info!(key = %self.key, total = records.len(), "scan appended to history");
        Ok(records)
    }

    /// Removes the history key entirely. Clearing an empty history succeeds.
    async fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        self.store.delete(&self.key).await?;
        tracing::info!(key = %self.key, "history cleared");
        Ok(())
    }
}
