//! Camera capability consumed by the scan session.
//!
//! Decoding itself belongs to the platform camera layer. The session only
//! needs to check permission and start or stop the preview; decoded payloads
//! come back to it as [`DecodeEvent`](crate::types::scan::DecodeEvent)s.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::types::camera::{CameraConfig, PermissionStatus};
use crate::types::errors::ScannerError;

#[async_trait]
pub trait CameraPort: Send + Sync {
    async fn permission_status(&self) -> PermissionStatus;

    /// Prompts the user for camera access and returns the resulting status.
    async fn request_permission(&self) -> PermissionStatus;

    async fn start(&self, config: &CameraConfig) -> Result<(), ScannerError>;

    async fn stop(&self) -> Result<(), ScannerError>;
}

#[derive(Debug)]
struct SimulatedState {
    permission: PermissionStatus,
    grant_on_request: bool,
    active: Option<CameraConfig>,
    start_count: usize,
}

/// In-process camera for the console front-end and tests.
///
/// Payloads are typed or injected by the caller instead of decoded from frames.
#[derive(Debug)]
pub struct SimulatedCamera {
    state: Mutex<SimulatedState>,
}

impl SimulatedCamera {
    /// Camera whose permission is already granted.
    pub fn granted() -> Self {
        Self::new(PermissionStatus::Granted, true)
    }

    /// `permission` is the initial status; `grant_on_request` decides how a
    /// permission prompt is answered.
    pub fn new(permission: PermissionStatus, grant_on_request: bool) -> Self {
        Self {
            state: Mutex::new(SimulatedState {
                permission,
                grant_on_request,
                active: None,
                start_count: 0,
            }),
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SimulatedState) -> T) -> T {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    pub fn is_active(&self) -> bool {
        self.with_state(|s| s.active.is_some())
    }

    /// Configuration the preview was last started with, while active.
    pub fn active_config(&self) -> Option<CameraConfig> {
        self.with_state(|s| s.active.clone())
    }

    pub fn start_count(&self) -> usize {
        self.with_state(|s| s.start_count)
    }

    pub fn set_grant_on_request(&self, grant: bool) {
        self.with_state(|s| s.grant_on_request = grant);
    }
}

#[async_trait]
impl CameraPort for SimulatedCamera {
    async fn permission_status(&self) -> PermissionStatus {
        self.with_state(|s| s.permission)
    }

    async fn request_permission(&self) -> PermissionStatus {
        self.with_state(|s| {
            s.permission = if s.grant_on_request {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            };
            s.permission
        })
    }

    async fn start(&self, config: &CameraConfig) -> Result<(), ScannerError> {
        self.with_state(|s| {
            if s.permission != PermissionStatus::Granted {
                return Err(ScannerError::PermissionDenied);
            }
            s.active = Some(config.clone());
            s.start_count += 1;
            Ok(())
        })
    }

    async fn stop(&self) -> Result<(), ScannerError> {
        self.with_state(|s| s.active = None);
        Ok(())
    }
}
