// QrScan shared type definitions
// Each submodule defines types used across the application.

pub mod camera;
pub mod errors;
pub mod scan;
pub mod settings;
