//! App Core for QrScan.
//!
//! Wires the settings, the key-value store, the history store, the scan
//! session and the history viewer together.

use std::path::PathBuf;
use std::sync::Arc;

use crate::managers::history_store::HistoryStore;
use crate::managers::history_viewer::HistoryViewer;
use crate::managers::scan_session::ScanSessionController;
use crate::platform;
use crate::services::camera::CameraPort;
use crate::services::clock::{Clock, SystemClock};
use crate::services::link_handler::LinkHandler;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::storage::{KeyValueStore, SqliteKeyValueStore};
use crate::types::errors::HistoryError;
use crate::types::settings::AppSettings;

/// Central application struct holding the managers.
pub struct App {
    pub settings: AppSettings,
    pub history: Arc<HistoryStore>,
    pub scanner: ScanSessionController,
    pub viewer: HistoryViewer,
    engine: SettingsEngine,
    store: Arc<dyn KeyValueStore>,
    camera: Arc<dyn CameraPort>,
    links: Arc<dyn LinkHandler>,
    clock: Arc<dyn Clock>,
}

fn open_store(settings: &AppSettings) -> Result<SqliteKeyValueStore, Box<dyn std::error::Error>> {
    let db_path = settings
        .storage
        .database_path
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(platform::default_database_path);
    let store = SqliteKeyValueStore::open(&db_path)
        .map_err(|e| format!("Failed to open {}: {}", db_path.display(), e))?;
    tracing::debug!(path = %db_path.display(), "history database opened");
    Ok(store)
}

impl App {
    /// Loads settings from `settings_path` (or the platform default) and opens
    /// the SQLite store they point at.
    ///
    /// A missing settings file gives defaults. An unreadable or invalid one is
    /// an error.
    pub fn open(
        settings_path: Option<String>,
        camera: Arc<dyn CameraPort>,
        links: Arc<dyn LinkHandler>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut engine = SettingsEngine::new(settings_path);
        engine
            .load()
            .map_err(|e| format!("{}: {}", engine.get_config_path(), e))?;

        let store = open_store(engine.get_settings())?;
        Ok(Self::with_store(engine, Arc::new(store), camera, links))
    }

    /// Builds the app from the engine's current settings on top of `store`.
    pub fn with_store(
        engine: SettingsEngine,
        store: Arc<dyn KeyValueStore>,
        camera: Arc<dyn CameraPort>,
        links: Arc<dyn LinkHandler>,
    ) -> Self {
        Self::with_clock(engine, store, camera, links, Arc::new(SystemClock))
    }

    pub fn with_clock(
        engine: SettingsEngine,
        store: Arc<dyn KeyValueStore>,
        camera: Arc<dyn CameraPort>,
        links: Arc<dyn LinkHandler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let settings = engine.get_settings().clone();
        let (history, scanner, viewer) =
            Self::build(&settings, &store, &camera, &links, &clock);

        Self {
            settings,
            history,
            scanner,
            viewer,
            engine,
            store,
            camera,
            links,
            clock,
        }
    }

    fn build(
        settings: &AppSettings,
        store: &Arc<dyn KeyValueStore>,
        camera: &Arc<dyn CameraPort>,
        links: &Arc<dyn LinkHandler>,
        clock: &Arc<dyn Clock>,
    ) -> (Arc<HistoryStore>, ScanSessionController, HistoryViewer) {
        let history = Arc::new(HistoryStore::with_settings(
            Arc::clone(store),
            settings.storage.history_key.clone(),
            settings.history.clone(),
        ));
        let scanner = ScanSessionController::with_clock(
            Arc::clone(camera),
            Arc::clone(&history),
            settings.scanner.clone(),
            Arc::clone(clock),
        );
        let viewer = HistoryViewer::new(Arc::clone(&history), Arc::clone(links));
        (history, scanner, viewer)
    }

    /// Loads the history into the scan counter and the viewer.
    ///
    /// Returns the number of stored scans. Failures leave both empty.
    pub async fn startup(&mut self) -> usize {
        if let Err(e) = self.scanner.initialize().await {
            tracing::warn!(error = %e, "could not load scan history");
        }
        if let Err(e) = self.viewer.load().await {
            tracing::warn!(error = %e, "could not load history view");
        }
        self.scanner.scan_count()
    }

    pub fn settings_path(&self) -> &str {
        self.engine.get_config_path()
    }

    /// Deletes the whole history and resets the scan counter.
    ///
    /// Returns the count read back after the clear.
    pub async fn clear_history(&mut self) -> Result<usize, HistoryError> {
        self.viewer.clear().await?;
        self.scanner.initialize().await
    }

    /// Updates one setting by dot path, saves it, and rebuilds the managers.
    ///
    /// The scanner is disarmed first. Changing `storage.database_path` opens
    /// the new SQLite file. Returns the number of stored scans afterwards.
    pub async fn update_setting(
        &mut self,
        key: &str,
        value: serde_json::Value,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        self.scanner.disarm().await?;
        self.engine.set_value(key, value)?;
        self.apply_settings().await
    }

    /// Restores default settings, saves them, and rebuilds the managers.
    pub async fn reset_settings(&mut self) -> Result<usize, Box<dyn std::error::Error>> {
        self.scanner.disarm().await?;
        self.engine.reset()?;
        self.apply_settings().await
    }

    async fn apply_settings(&mut self) -> Result<usize, Box<dyn std::error::Error>> {
        let settings = self.engine.get_settings().clone();
        if settings.storage.database_path != self.settings.storage.database_path {
            self.store = Arc::new(open_store(&settings)?);
        }

        let (history, scanner, viewer) =
            Self::build(&settings, &self.store, &self.camera, &self.links, &self.clock);
        self.settings = settings;
        self.history = history;
        self.scanner = scanner;
        self.viewer = viewer;

        tracing::info!(key = %self.settings.storage.history_key, "settings applied");
        Ok(self.startup().await)
    }
}
