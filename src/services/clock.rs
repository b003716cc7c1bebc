//! Capture-time source for scan records.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::types::settings::DEFAULT_TIMESTAMP_FORMAT;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Returns true if `format` is a strftime pattern chrono can render.
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Renders `time` with `format`, falling back to [`DEFAULT_TIMESTAMP_FORMAT`]
/// when the pattern is invalid.
pub fn format_timestamp(time: &DateTime<Local>, format: &str) -> String {
    let pattern = if is_valid_format(format) {
        format
    } else {
        tracing::warn!(pattern = format, "invalid timestamp format, using default");
        DEFAULT_TIMESTAMP_FORMAT
    };
    time.format(pattern).to_string()
}
