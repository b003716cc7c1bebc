//! Scan Session Controller for QrScan.
//!
//! Owns the armed/disarmed gate around the camera. Exactly one decode is
//! recorded per arming: the first decode disarms the scanner before the
//! record is persisted, and any decode that arrives while disarmed is dropped.

use std::sync::Arc;

use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::services::camera::CameraPort;
use crate::services::clock::{self, Clock, SystemClock};
use crate::types::camera::PermissionStatus;
use crate::types::errors::{HistoryError, ScannerError};
use crate::types::scan::{DecodeEvent, DecodeOutcome, ScanRecord, ScannerState};
use crate::types::settings::ScannerSettings;

pub struct ScanSessionController {
    camera: Arc<dyn CameraPort>,
    history: Arc<HistoryStore>,
    clock: Arc<dyn Clock>,
    settings: ScannerSettings,
    state: ScannerState,
    scan_count: usize,
}

impl ScanSessionController {
    pub fn new(
        camera: Arc<dyn CameraPort>,
        history: Arc<HistoryStore>,
        settings: ScannerSettings,
    ) -> Self {
        Self::with_clock(camera, history, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        camera: Arc<dyn CameraPort>,
        history: Arc<HistoryStore>,
        settings: ScannerSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            camera,
            history,
            clock,
            settings,
            state: ScannerState::Disarmed,
            scan_count: 0,
        }
    }

    /// Loads the persisted history once and caches its length.
    pub async fn initialize(&mut self) -> Result<usize, HistoryError> {
        self.scan_count = self.history.load_all().await?.len();
        Ok(self.scan_count)
    }

    pub fn state(&self) -> ScannerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == ScannerState::Armed
    }

    /// History length as of the last load or recorded scan.
    pub fn scan_count(&self) -> usize {
        self.scan_count
    }

    pub fn settings(&self) -> &ScannerSettings {
        &self.settings
    }

    pub async fn permission_status(&self) -> PermissionStatus {
        self.camera.permission_status().await
    }

    /// Asks the user for camera access again after a denial.
    pub async fn request_permission(&self) -> PermissionStatus {
        let status = self.camera.request_permission().await;
        tracing::debug!(?status, "camera permission requested");
        status
    }

    /// Starts the camera and accepts the next decode.
    ///
    /// An undetermined permission is requested once. Arming while already
    /// armed does nothing.
    pub async fn arm(&mut self) -> Result<(), ScannerError> {
        if self.is_armed() {
            return Ok(());
        }

        let mut status = self.camera.permission_status().await;
        if status == PermissionStatus::Undetermined {
            status = self.request_permission().await;
        }
        if status != PermissionStatus::Granted {
            tracing::warn!(?status, "cannot arm scanner without camera permission");
            return Err(ScannerError::PermissionDenied);
        }

        self.camera
            .start(&self.settings.camera_config())
            .await
            .map_err(|e| match e {
                ScannerError::PermissionDenied => ScannerError::PermissionDenied,
                other => ScannerError::CameraUnavailable(other.to_string()),
            })?;

        self.state = ScannerState::Armed;
        tracing::debug!("scanner armed");
        Ok(())
    }

    /// Stops the camera without recording anything.
    pub async fn disarm(&mut self) -> Result<(), ScannerError> {
        if !self.is_armed() {
            return Ok(());
        }
        self.state = ScannerState::Disarmed;
        self.camera.stop().await?;
        tracing::debug!("scanner disarmed");
        Ok(())
    }

    /// Handles one decoded payload from the camera layer.
    pub async fn on_decode(&mut self, event: DecodeEvent) -> Result<DecodeOutcome, ScannerError> {
        if !self.is_armed() {
            tracing::debug!("decode ignored while disarmed");
            return Ok(DecodeOutcome::Ignored);
        }

        // Close the gate first so a burst of decodes yields one record.
        self.state = ScannerState::Disarmed;
        if let Err(e) = self.camera.stop().await {
            tracing::warn!(error = %e, "failed to stop camera after decode");
        }

        let timestamp = clock::format_timestamp(&self.clock.now(), &self.settings.timestamp_format);
        let record = ScanRecord::new(event.payload, timestamp);

        let records = self
            .history
            .append(record.clone())
            .await
            .map_err(|e| ScannerError::Persistence(e.to_string()))?;
        self.scan_count = records.len();

        tracing::info!(payload = %record.url, total = self.scan_count, "code scanned");
        Ok(DecodeOutcome::Recorded {
            record,
            total: self.scan_count,
        })
    }
}
