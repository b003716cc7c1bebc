use serde::{Deserialize, Serialize};

use super::camera::{BarcodeType, CameraConfig, CameraFacing};

/// Storage key the scan history lives under unless configured otherwise.
pub const DEFAULT_HISTORY_KEY: &str = "qrList";

/// Format applied to capture times unless configured otherwise.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Top-level application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub scanner: ScannerSettings,
    #[serde(default)]
    pub history: HistorySettings,
}

/// Where and under which key the history is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite file path. `None` uses `qrscan.db` in the platform data directory.
    pub database_path: Option<String>,
    pub history_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: None,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
        }
    }
}

/// Camera and timestamping settings for the scan session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScannerSettings {
    pub facing: CameraFacing,
    pub barcode_types: Vec<BarcodeType>,
    /// strftime pattern used to render capture times.
    pub timestamp_format: String,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Back,
            barcode_types: vec![BarcodeType::Qr],
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ScannerSettings {
    pub fn camera_config(&self) -> CameraConfig {
        CameraConfig {
            facing: self.facing,
            barcode_types: self.barcode_types.clone(),
        }
    }
}

/// What to do when the stored history blob cannot be decoded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CorruptHistoryPolicy {
    /// Log a warning and behave as if no history existed.
    #[default]
    TreatAsEmpty,
    /// Surface the failure to the caller.
    Fail,
}

/// History retention settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct HistorySettings {
    /// Keep at most this many records, dropping the oldest. `None` is unbounded.
    pub max_entries: Option<usize>,
    pub on_corrupt: CorruptHistoryPolicy,
}
