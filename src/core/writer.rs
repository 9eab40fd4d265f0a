//! `io::Write` adapter over a logger

use super::{log_level::LogLevel, logger::Logger};
use std::fmt;
use std::io::{self, Write};

/// Writer that turns every `write` call into one log call.
///
/// A single trailing newline is stripped from each write, so the adapter
/// can be handed to code that emits whole lines, such as `writeln!`.
///
/// # Example
///
/// ```
/// use rust_log_dispatch::prelude::*;
/// use std::io::Write;
///
/// let logger = Logger::builder().no_default_target().build().unwrap();
/// let mut out = logger.writer(LogLevel::Info);
/// writeln!(out, "listening on port {}", 8080).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct LoggerWriter {
    logger: Logger,
    level: LogLevel,
}

// emit <- write / write_all / write_fmt, in place of the one Logger method frame
const WRITER_FRAMES: usize = 1;

impl LoggerWriter {
    pub fn new(logger: Logger, level: LogLevel) -> Self {
        Self { logger, level }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    fn emit(&self, buf: &[u8]) {
        let line = buf.strip_suffix(b"\n").unwrap_or(buf);
        let line = String::from_utf8_lossy(line);
        self.logger.engine().submit(
            &self.logger,
            self.level,
            format_args!("{}", line),
            WRITER_FRAMES,
        );
    }
}

// Every entry point must call `emit` directly: the recorded call stack skips
// a fixed number of frames.
impl Write for LoggerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.emit(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        if !buf.is_empty() {
            self.emit(buf);
        }
        Ok(())
    }

    // One log call per formatted write instead of one per fragment
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        match args.as_str() {
            Some(text) if !text.is_empty() => self.emit(text.as_bytes()),
            Some(_) => {}
            None => self.emit(args.to_string().as_bytes()),
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
