//! Message formatters
//!
//! A formatter renders an entry into the text handed to targets. It runs
//! once per entry on the thread that logged it, before the entry is queued.

use super::log_entry::LogEntry;
use super::logger::Logger;
use chrono::SecondsFormat;
use std::sync::Arc;

/// Renders an entry for output.
pub type Formatter = Arc<dyn Fn(&Logger, &LogEntry) -> String + Send + Sync>;

/// `<RFC 3339 time>|<level>|<category>|<message><call stack>`
pub fn default_formatter(_logger: &Logger, entry: &LogEntry) -> String {
    format!(
        "{}|{}|{}|{}{}",
        entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
        entry.level,
        entry.category,
        entry.message,
        entry.call_stack_str()
    )
}

/// `<YYYY-MM-DD hh:mm:ss>|<level>|<category>|<message><call stack>`
pub fn normal_formatter(_logger: &Logger, entry: &LogEntry) -> String {
    format!(
        "{}|{}|{}|{}{}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.level,
        entry.category,
        entry.message,
        entry.call_stack_str()
    )
}

/// One JSON object per entry, suitable for line-oriented collectors
pub fn json_formatter(_logger: &Logger, entry: &LogEntry) -> String {
    serde_json::to_string(entry).unwrap_or_default()
}

pub fn default() -> Formatter {
    Arc::new(default_formatter)
}

pub fn normal() -> Formatter {
    Arc::new(normal_formatter)
}

pub fn json() -> Formatter {
    Arc::new(json_formatter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Logger};

    fn detached() -> Logger {
        Logger::builder().no_default_target().build().unwrap()
    }

    #[test]
    fn test_normal_formatter_layout() {
        let logger = detached();
        let entry = LogEntry::new(LogLevel::Warn, "db", "slow query");
        let text = normal_formatter(&logger, &entry);

        let parts: Vec<&str> = text.split('|').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].len(), "2006-01-02 15:04:05".len());
        assert_eq!(parts[1], "Warn");
        assert_eq!(parts[2], "db");
        assert_eq!(parts[3], "slow query");
    }

    #[test]
    fn test_default_formatter_appends_call_stack() {
        let logger = detached();
        let entry = LogEntry::new(LogLevel::Error, "app", "boom")
            .with_call_stack("\nsrc/main.rs:10".to_string());
        let text = default_formatter(&logger, &entry);

        assert!(text.contains("|Error|app|boom\nsrc/main.rs:10"));
        assert!(text.contains('T'));
    }

    #[test]
    fn test_json_formatter() {
        let logger = detached();
        let entry = LogEntry::new(LogLevel::Info, "http", "request served");
        let text = json_formatter(&logger, &entry);

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["level"], "Info");
        assert_eq!(parsed["category"], "http");
        assert_eq!(parsed["message"], "request served");
        assert!(parsed.get("formatted_message").is_none());
    }
}
