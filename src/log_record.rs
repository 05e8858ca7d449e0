use chrono::{DateTime, Local};

/// Wall-clock format used on both the console and in the log file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator between the timestamp and the device text.
const SEPARATOR: &str = "\t\t\t\t";

/// One decoded device line, stamped at receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    /// Decoded line with surrounding whitespace trimmed
    pub text: String,
}

impl LogRecord {
    pub fn new(timestamp: DateTime<Local>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }

    pub fn now(text: impl Into<String>) -> Self {
        Self::new(Local::now(), text)
    }

    /// Render as a single newline-terminated line.
    pub fn render(&self) -> String {
        format!(
            "{}{}{}\n",
            self.timestamp.format(TIMESTAMP_FORMAT),
            SEPARATOR,
            self.text
        )
    }
}
