use serde::{Deserialize, Serialize};

/// One decoded payload and the time it was captured.
///
/// `url` holds the raw payload exactly as the camera decoded it. It is not
/// validated or parsed, so plain text codes are stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanRecord {
    pub url: String,
    pub timestamp: String,
}

impl ScanRecord {
    pub fn new(url: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Whether the scanner currently accepts decode events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ScannerState {
    #[default]
    Disarmed,
    Armed,
}

/// A decode event delivered by the camera layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeEvent {
    pub payload: String,
}

impl DecodeEvent {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

/// Result of handing a decode event to the scan session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The payload was recorded; `total` is the history length afterwards.
    Recorded { record: ScanRecord, total: usize },
    /// The scanner was disarmed, so the event was dropped.
    Ignored,
}
