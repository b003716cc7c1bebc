// QrScan platform paths for Linux
// Config: ~/.config/qrscan
// Data:   ~/.local/share/qrscan

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/qrscan` if set, otherwise `~/.config/qrscan`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("qrscan"),
        _ => home_dir().join(".config").join("qrscan"),
    }
}

/// Uses `$XDG_DATA_HOME/qrscan` if set, otherwise `~/.local/share/qrscan`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("qrscan"),
        _ => home_dir().join(".local").join("share").join("qrscan"),
    }
}

pub fn open_command(target: &str) -> (&'static str, Vec<String>) {
    ("xdg-open", vec![target.to_string()])
}
