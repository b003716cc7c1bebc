//! End-to-end tests of the wired App: scanner screen and history screen
//! sharing one history store.

use std::sync::Arc;

use chrono::{Local, TimeZone};
use qrscan::app::App;
use qrscan::managers::history_store::HistoryStoreTrait;
use qrscan::services::camera::SimulatedCamera;
use qrscan::types::camera::CameraFacing;
use qrscan::services::clock::FixedClock;
use qrscan::services::link_handler::SystemLinkHandler;
use qrscan::services::settings_engine::SettingsEngine;
use qrscan::storage::{KeyValueStore, MemoryKeyValueStore};
use qrscan::types::scan::{DecodeEvent, DecodeOutcome, ScanRecord};
use qrscan::types::settings::{AppSettings, DEFAULT_HISTORY_KEY};
use tempfile::TempDir;

fn settings_file(dir: &TempDir) -> String {
    dir.path().join("settings.json").to_string_lossy().to_string()
}

fn memory_app(kv: Arc<MemoryKeyValueStore>, dir: &TempDir) -> App {
    let clock = FixedClock(Local.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    App::with_clock(
        SettingsEngine::new(Some(settings_file(dir))),
        kv,
        Arc::new(SimulatedCamera::granted()),
        Arc::new(SystemLinkHandler),
        Arc::new(clock),
    )
}

#[tokio::test]
async fn test_scan_then_view_then_clear() {
    let dir = TempDir::new().unwrap();
    let kv = Arc::new(MemoryKeyValueStore::new());
    let mut app = memory_app(kv.clone(), &dir);
    assert_eq!(app.startup().await, 0);

    app.scanner.arm().await.unwrap();
    let outcome = app
        .scanner
        .on_decode(DecodeEvent::new("https://a.com"))
        .await
        .unwrap();
    assert!(matches!(outcome, DecodeOutcome::Recorded { total: 1, .. }));

    let entries = app.viewer.load().await.unwrap();
    assert_eq!(
        entries,
        &[ScanRecord::new("https://a.com", "2024-01-01 10:00:00")][..]
    );

    app.viewer.clear().await.unwrap();
    assert!(app.history.load_all().await.unwrap().is_empty());
    assert!(!kv.contains("qrList").await.unwrap());
}

#[tokio::test]
async fn test_startup_reads_existing_history() {
    let kv = Arc::new(MemoryKeyValueStore::new());
    kv.set(
        "qrList",
        r#"[{"url":"https://a.com","timestamp":"x"},{"url":"https://b.com","timestamp":"y"}]"#,
    )
    .await
    .unwrap();

    let dir = TempDir::new().unwrap();
    let mut app = memory_app(kv, &dir);
    assert_eq!(app.startup().await, 2);
    assert_eq!(app.viewer.len(), 2);
}

#[tokio::test]
async fn test_open_uses_configured_database_and_key() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("data").join("history.db");
    let settings_path = dir.path().join("settings.json");

    let mut settings = AppSettings::default();
    settings.storage.database_path = Some(db_path.to_string_lossy().to_string());
    settings.storage.history_key = "scans".to_string();
    std::fs::write(&settings_path, serde_json::to_string(&settings).unwrap()).unwrap();

    {
        let mut app = App::open(
            Some(settings_path.to_string_lossy().to_string()),
            Arc::new(SimulatedCamera::granted()),
            Arc::new(SystemLinkHandler),
        )
        .unwrap();
        app.startup().await;
        assert_eq!(app.history.key(), "scans");

        app.scanner.arm().await.unwrap();
        app.scanner
            .on_decode(DecodeEvent::new("persisted"))
            .await
            .unwrap();
    }

    assert!(db_path.exists());

    let mut reopened = App::open(
        Some(settings_path.to_string_lossy().to_string()),
        Arc::new(SimulatedCamera::granted()),
        Arc::new(SystemLinkHandler),
    )
    .unwrap();
    assert_eq!(reopened.startup().await, 1);
    assert_eq!(reopened.viewer.entries()[0].url, "persisted");
}

#[tokio::test]
async fn test_open_fails_on_invalid_settings_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{ "storage": { "history_key": "" }, "history": { "max_entries": 0 } }"#,
    )
    .unwrap();

    let result = App::open(
        Some(settings_file(&dir)),
        Arc::new(SimulatedCamera::granted()),
        Arc::new(SystemLinkHandler),
    );
    assert!(result.is_err());
}

#[tokio::test]
async fn test_open_accepts_partial_scanner_section() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("history.db");
    std::fs::write(
        dir.path().join("settings.json"),
        serde_json::json!({
            "storage": { "database_path": db_path.to_string_lossy() },
            "scanner": { "facing": "Front" }
        })
        .to_string(),
    )
    .unwrap();

    let app = App::open(
        Some(settings_file(&dir)),
        Arc::new(SimulatedCamera::granted()),
        Arc::new(SystemLinkHandler),
    )
    .unwrap();
    assert_eq!(app.settings.scanner.facing, CameraFacing::Front);
    assert_eq!(app.history.key(), DEFAULT_HISTORY_KEY);
}

#[tokio::test]
async fn test_clear_history_resets_scan_count() {
    let dir = TempDir::new().unwrap();
    let kv = Arc::new(MemoryKeyValueStore::new());
    let mut app = memory_app(kv.clone(), &dir);
    app.startup().await;

    app.scanner.arm().await.unwrap();
    app.scanner.on_decode(DecodeEvent::new("one")).await.unwrap();
    assert_eq!(app.scanner.scan_count(), 1);

    assert_eq!(app.clear_history().await.unwrap(), 0);
    assert_eq!(app.scanner.scan_count(), 0);
    assert!(app.viewer.is_empty());
    assert!(!kv.contains("qrList").await.unwrap());
}

#[tokio::test]
async fn test_update_setting_switches_history_key_and_persists() {
    let dir = TempDir::new().unwrap();
    let kv = Arc::new(MemoryKeyValueStore::new());
    kv.set("scans", r#"[{"url":"https://a.com","timestamp":"x"}]"#)
        .await
        .unwrap();

    let mut app = memory_app(kv.clone(), &dir);
    assert_eq!(app.startup().await, 0);
    app.scanner.arm().await.unwrap();

    let total = app
        .update_setting("storage.history_key", serde_json::json!("scans"))
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert!(!app.scanner.is_armed());
    assert_eq!(app.history.key(), "scans");
    assert_eq!(app.viewer.entries()[0].url, "https://a.com");

    let saved: AppSettings =
        serde_json::from_str(&std::fs::read_to_string(settings_file(&dir)).unwrap()).unwrap();
    assert_eq!(saved.storage.history_key, "scans");
}

#[tokio::test]
async fn test_update_setting_rejects_invalid_value() {
    let dir = TempDir::new().unwrap();
    let kv = Arc::new(MemoryKeyValueStore::new());
    let mut app = memory_app(kv, &dir);
    app.startup().await;

    assert!(app
        .update_setting("history.max_entries", serde_json::json!(0))
        .await
        .is_err());
    assert_eq!(app.settings, AppSettings::default());
    assert!(!std::path::Path::new(&settings_file(&dir)).exists());
}

#[tokio::test]
async fn test_reset_settings_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let kv = Arc::new(MemoryKeyValueStore::new());
    let mut app = memory_app(kv, &dir);
    app.startup().await;

    app.update_setting("storage.history_key", serde_json::json!("scans"))
        .await
        .unwrap();
    app.update_setting("history.max_entries", serde_json::json!(5))
        .await
        .unwrap();

    app.reset_settings().await.unwrap();
    assert_eq!(app.settings, AppSettings::default());
    assert_eq!(app.history.key(), DEFAULT_HISTORY_KEY);
    assert_eq!(app.history.settings().max_entries, None);

    let saved: AppSettings =
        serde_json::from_str(&std::fs::read_to_string(settings_file(&dir)).unwrap()).unwrap();
    assert_eq!(saved, AppSettings::default());
}
