//! History Viewer for QrScan.
//!
//! Backs the history screen: a snapshot of the log loaded on demand, a clear
//! action, and open/share actions for a single entry.

use std::sync::Arc;

use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::services::link_handler::LinkHandler;
use crate::types::errors::HistoryError;
use crate::types::scan::ScanRecord;

pub struct HistoryViewer {
    history: Arc<HistoryStore>,
    links: Arc<dyn LinkHandler>,
    entries: Vec<ScanRecord>,
}

impl HistoryViewer {
    pub fn new(history: Arc<HistoryStore>, links: Arc<dyn LinkHandler>) -> Self {
        Self {
            history,
            links,
            entries: Vec::new(),
        }
    }

    /// Reloads the snapshot from storage.
    pub async fn load(&mut self) -> Result<&[ScanRecord], HistoryError> {
        self.entries = self.history.load_all().await?;
        Ok(&self.entries)
    }

    pub fn entries(&self) -> &[ScanRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&ScanRecord, HistoryError> {
        self.entries.get(index).ok_or(HistoryError::NotFound(index))
    }

    /// Deletes the persisted history and empties the snapshot.
    pub async fn clear(&mut self) -> Result<(), HistoryError> {
        self.history.clear().await?;
        self.entries.clear();
        Ok(())
    }

    /// Opens the payload at `index` with the link handler.
    pub async fn open(&self, index: usize) -> Result<(), HistoryError> {
        let record = self.get(index)?;
        self.links
            .open(&record.url)
            .await
            .map_err(|e| HistoryError::LinkFailed(e.to_string()))
    }

    pub async fn share(&self, index: usize) -> Result<(), HistoryError> {
        let record = self.get(index)?;
        self.links
            .share(&record.url)
            .await
            .map_err(|e| HistoryError::LinkFailed(e.to_string()))
    }
}
