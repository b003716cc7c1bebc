// QrScan platform paths for Windows
// Config and data: %APPDATA%\QrScan

use std::env;
use std::path::PathBuf;

/// `%APPDATA%\QrScan`, falling back to `C:\Users\Default\AppData\Roaming\QrScan`.
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from(r"C:\Users\Default\AppData\Roaming"));
    PathBuf::from(appdata).join("QrScan")
}

pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

/// Hands `target` to the shell URL protocol handler without going through
/// `cmd.exe`, so `&`, `|` and `^` in the payload are never interpreted.
pub fn open_command(target: &str) -> (&'static str, Vec<String>) {
    (
        "rundll32",
        vec!["url.dll,FileProtocolHandler".to_string(), target.to_string()],
    )
}
