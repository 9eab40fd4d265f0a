//! File target implementation

use crate::core::{ErrorSink, LogEntry, LoggerError, Result, Target};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends formatted entries to a file, one per line.
///
/// The file is opened when the logger opens and flushed and released when
/// it closes, so a logger can be reopened after the file was rotated
/// externally.
pub struct FileTarget {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    errors: Option<ErrorSink>,
}

impl FileTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
            errors: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Target for FileTarget {
    fn open(&mut self, errors: ErrorSink) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    self.path.display().to_string(),
                    e,
                )
            })?;
        self.writer = Some(BufWriter::new(file));
        self.errors = Some(errors);
        Ok(())
    }

    fn process(&mut self, entry: &LogEntry) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", entry.formatted_message) {
            if let Some(errors) = self.errors.as_ref() {
                errors.report(format_args!(
                    "[LOGGER ERROR] Failed to write to {}: {}",
                    self.path.display(),
                    e
                ));
            }
        }
    }

    fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                if let Some(errors) = self.errors.as_ref() {
                    errors.report(format_args!(
                        "[LOGGER ERROR] Failed to flush {}: {}",
                        self.path.display(),
                        e
                    ));
                }
            }
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileTarget {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        self.close();
    }
}
