//! QrScan — a QR code scanner session with a persistent scan history.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod storage;
pub mod types;
