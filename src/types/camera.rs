use serde::{Deserialize, Serialize};

/// Which physical camera to scan with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

/// Symbologies the camera layer is asked to decode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BarcodeType {
    Qr,
    Aztec,
    DataMatrix,
    Pdf417,
    Ean13,
    Code128,
}

/// Camera permission as reported by the platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PermissionStatus {
    /// The user has not been asked yet.
    Undetermined,
    Granted,
    Denied,
}

/// Parameters passed to the camera when the scanner is armed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraConfig {
    pub facing: CameraFacing,
    pub barcode_types: Vec<BarcodeType>,
}
