//! QrScan console front-end.
//!
//! Drives the scan session and history screen from stdin. A simulated camera
//! stands in for the device: `scan <payload>` delivers a decode event.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use qrscan::app::App;
use qrscan::services::camera::SimulatedCamera;
use qrscan::services::link_handler::SystemLinkHandler;
use qrscan::types::camera::PermissionStatus;
use qrscan::types::errors::ScannerError;
use qrscan::types::scan::{DecodeEvent, DecodeOutcome};

const HELP: &str = "\
Commands:
  arm              start the scanner
  disarm           stop the scanner
  scan <payload>   deliver a decoded code to the scanner
  permit           ask for camera permission again
  count            number of stored scans
  history          list stored scans
  open <n>         open entry n
  share <n>        share entry n
  clear            delete the whole history
  settings         show the current settings
  set <key> <json> change one setting, e.g. 'set history.max_entries 100'
  reset-settings   restore the default settings
  help             show this message
  quit             exit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    qrscan::logging::init_logging("info");

    let settings_path = std::env::var("QRSCAN_SETTINGS").ok();
    let camera = Arc::new(SimulatedCamera::new(PermissionStatus::Undetermined, true));
    let mut app = App::open(settings_path, camera, Arc::new(SystemLinkHandler))?;

    let total = app.startup().await;
    println!("QrScan v{}", env!("CARGO_PKG_VERSION"));
    println!("Total scanned: {}", total);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "arm" => match app.scanner.arm().await {
                Ok(()) => println!("Scanner armed"),
                Err(ScannerError::PermissionDenied) => {
                    println!("Allow the app to use the camera, then type 'permit'.")
                }
                Err(e) => tracing::error!(error = %e, "could not arm scanner"),
            },
            "disarm" => match app.scanner.disarm().await {
                Ok(()) => println!("Scanner disabled"),
                Err(e) => tracing::error!(error = %e, "could not disarm scanner"),
            },
            "scan" => match app.scanner.on_decode(DecodeEvent::new(arg)).await {
                Ok(DecodeOutcome::Recorded { record, total }) => {
                    println!("Scanned: {}", record.url);
                    println!("Total scanned: {}", total);
                }
                Ok(DecodeOutcome::Ignored) => println!("Scanner is disabled, type 'arm' first"),
                Err(e) => tracing::error!(error = %e, "scan was not saved"),
            },
            "permit" => {
                let status = app.scanner.request_permission().await;
                println!("Camera permission: {:?}", status);
            }
            "count" => println!("Total scanned: {}", app.scanner.scan_count()),
            "history" => match app.viewer.load().await {
                Ok(entries) if entries.is_empty() => println!("No codes scanned yet."),
                Ok(entries) => {
                    for (i, record) in entries.iter().enumerate() {
                        println!("{:>3}. {}  (scanned {})", i, record.url, record.timestamp);
                    }
                }
                Err(e) => tracing::error!(error = %e, "could not load history"),
            },
            "open" | "share" => {
                let Ok(index) = arg.parse::<usize>() else {
                    println!("Usage: {} <n>", command);
                    continue;
                };
                if let Err(e) = app.viewer.load().await {
                    tracing::error!(error = %e, "could not load history");
                    continue;
                }
                let result = if command == "open" {
                    app.viewer.open(index).await
                } else {
                    app.viewer.share(index).await
                };
                if let Err(e) = result {
                    tracing::error!(error = %e, "{} failed", command);
                }
            }
            "clear" => match app.clear_history().await {
                Ok(_) => println!("History deleted."),
                Err(e) => tracing::error!(error = %e, "could not clear history"),
            },
            "settings" => match serde_json::to_string_pretty(&app.settings) {
                Ok(json) => {
                    println!("{}", json);
                    println!("(stored in {})", app.settings_path());
                }
                Err(e) => tracing::error!(error = %e, "could not render settings"),
            },
            "set" => {
                let Some((key, raw)) = arg.split_once(char::is_whitespace) else {
                    println!("Usage: set <key> <json>");
                    continue;
                };
                let raw = raw.trim();
                // bare words are taken as strings: `set storage.history_key scans`
                let value = serde_json::from_str(raw)
                    .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
                match app.update_setting(key, value).await {
                    Ok(total) => {
                        println!("Updated {}", key);
                        println!("Total scanned: {}", total);
                    }
                    Err(e) => tracing::error!(error = %e, key, "could not update setting"),
                }
            }
            "reset-settings" => match app.reset_settings().await {
                Ok(total) => {
                    println!("Settings restored to defaults.");
                    println!("Total scanned: {}", total);
                }
                Err(e) => tracing::error!(error = %e, "could not reset settings"),
            },
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    Ok(())
}
