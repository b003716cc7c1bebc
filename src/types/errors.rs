use std::fmt;

// === StorageError ===

/// Errors raised by a key-value persistence backend.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The backend rejected or failed the operation.
    DatabaseError(String),
    /// The background task running the operation did not complete.
    TaskFailed(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::TaskFailed(msg) => write!(f, "Storage task failed: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

// === HistoryError ===

/// Errors related to the persisted scan history.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// No history entry exists at the given position.
    NotFound(usize),
    /// The storage backend failed to read or write the history blob.
    StorageError(String),
    /// The history could not be serialized.
    SerializationError(String),
    /// The stored blob is not a valid serialized history.
    CorruptData(String),
    /// The link handler could not open or share an entry.
    LinkFailed(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NotFound(index) => {
                write!(f, "History entry not found at index: {}", index)
            }
            HistoryError::StorageError(msg) => write!(f, "History storage error: {}", msg),
            HistoryError::SerializationError(msg) => {
                write!(f, "History serialization error: {}", msg)
            }
            HistoryError::CorruptData(msg) => write!(f, "History data is corrupt: {}", msg),
            HistoryError::LinkFailed(msg) => write!(f, "History link action failed: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<StorageError> for HistoryError {
    fn from(err: StorageError) -> Self {
        HistoryError::StorageError(err.to_string())
    }
}

// === ScannerError ===

/// Errors related to the scan session and the camera.
#[derive(Debug, Clone, PartialEq)]
pub enum ScannerError {
    /// Camera permission was not granted; the user may request it again.
    PermissionDenied,
    /// The camera could not be started or stopped.
    CameraUnavailable(String),
    /// The decoded payload could not be written to the history.
    Persistence(String),
}

impl fmt::Display for ScannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScannerError::PermissionDenied => write!(f, "Camera permission denied"),
            ScannerError::CameraUnavailable(msg) => write!(f, "Camera unavailable: {}", msg),
            ScannerError::Persistence(msg) => write!(f, "Failed to save scan: {}", msg),
        }
    }
}

impl std::error::Error for ScannerError {}

// === LinkError ===

/// Errors related to opening or sharing a scanned payload.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkError {
    /// The payload is empty and cannot be handed off.
    EmptyPayload,
    /// The payload starts with `-` and would be read as an opener option.
    UnsafePayload(String),
    /// The system opener could not be launched or exited unsuccessfully.
    OpenFailed(String),
    /// The payload could not be handed to the share target.
    ShareFailed(String),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::EmptyPayload => write!(f, "Cannot open an empty payload"),
            LinkError::UnsafePayload(payload) => {
                write!(f, "Refusing to open payload starting with '-': {}", payload)
            }
            LinkError::OpenFailed(msg) => write!(f, "Failed to open link: {}", msg),
            LinkError::ShareFailed(msg) => write!(f, "Failed to share payload: {}", msg),
        }
    }
}

impl std::error::Error for LinkError {}

// === SettingsError ===

/// Errors related to settings persistence and updates.
#[derive(Debug)]
pub enum SettingsError {
    /// File system I/O error.
    IoError(String),
    /// JSON serialization or deserialization error.
    SerializationError(String),
    /// The specified settings key does not exist.
    InvalidKey(String),
    /// The provided value is invalid for the setting.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => write!(f, "Invalid settings value: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}
