// QrScan platform abstraction
// Provides platform-specific paths and the system "open link" command.
//
// Uses `cfg(target_os)` to select the implementation at compile time.

use std::path::PathBuf;

// All three are compiled everywhere so the launch commands can be checked on any host.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
mod linux;

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
mod macos;

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
mod windows;

/// Returns the platform-specific configuration directory for QrScan.
///
/// - **Linux**: `~/.config/qrscan` (or `$XDG_CONFIG_HOME/qrscan`)
/// - **macOS**: `~/Library/Application Support/QrScan`
/// - **Windows**: `%APPDATA%/QrScan`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory for QrScan.
///
/// - **Linux**: `~/.local/share/qrscan` (or `$XDG_DATA_HOME/qrscan`)
/// - **macOS**: `~/Library/Application Support/QrScan`
/// - **Windows**: `%APPDATA%/QrScan`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Default location of the history database.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join("qrscan.db")
}

/// Program and arguments that hand `target` to the desktop's default handler.
///
/// No platform goes through a shell. Callers must reject targets starting
/// with `-`, which the openers would read as an option.
pub fn open_command(target: &str) -> (&'static str, Vec<String>) {
    #[cfg(target_os = "linux")]
    {
        linux::open_command(target)
    }
    #[cfg(target_os = "macos")]
    {
        macos::open_command(target)
    }
    #[cfg(target_os = "windows")]
    {
        windows::open_command(target)
    }
}
