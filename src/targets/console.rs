//! Console target implementation

use crate::core::{ErrorSink, LogEntry, LogLevel, Result, Target};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Write};

/// Writes formatted entries to the terminal.
///
/// Error and Fatal entries go to stderr, everything else to stdout.
pub struct ConsoleTarget {
    use_colors: bool,
    errors: Option<ErrorSink>,
}

impl ConsoleTarget {
    pub fn new() -> Self {
        Self::with_colors(cfg!(feature = "console"))
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            errors: None,
        }
    }

    fn render(&self, entry: &LogEntry) -> String {
        if self.use_colors {
            paint(entry)
        } else {
            entry.formatted_message.clone()
        }
    }
}

#[cfg(feature = "console")]
fn paint(entry: &LogEntry) -> String {
    entry
        .formatted_message
        .color(entry.level.color_code())
        .to_string()
}

#[cfg(not(feature = "console"))]
fn paint(entry: &LogEntry) -> String {
    entry.formatted_message.clone()
}

impl Default for ConsoleTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl Target for ConsoleTarget {
    fn open(&mut self, errors: ErrorSink) -> Result<()> {
        self.errors = Some(errors);
        Ok(())
    }

    fn process(&mut self, entry: &LogEntry) {
        let output = self.render(entry);
        let written = match entry.level {
            LogLevel::Error | LogLevel::Fatal => writeln!(io::stderr().lock(), "{}", output),
            _ => writeln!(io::stdout().lock(), "{}", output),
        };
        if let (Err(e), Some(errors)) = (written, self.errors.as_ref()) {
            errors.report(format_args!("[LOGGER ERROR] Console target failed: {}", e));
        }
    }

    fn close(&mut self) {
        // Flush both streams since we write to both
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        self.errors = None;
    }

    fn name(&self) -> &str {
        "console"
    }
}
