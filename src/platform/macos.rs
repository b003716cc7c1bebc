// QrScan platform paths for macOS
// Config and data: ~/Library/Application Support/QrScan

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `~/Library/Application Support/QrScan`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("QrScan")
}

/// Same as the config directory on macOS.
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

pub fn open_command(target: &str) -> (&'static str, Vec<String>) {
    ("open", vec![target.to_string()])
}
