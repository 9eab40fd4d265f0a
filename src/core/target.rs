//! Target trait for log output destinations

use super::{error::Result, log_entry::LogEntry};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// A destination that receives dispatched log entries.
///
/// The engine calls `open` once per open cycle, `process` for every entry in
/// registration order, and `close` once after the queue has drained. `process`
/// runs on the dispatcher thread (or on the logging thread in sync mode and
/// for fatal entries) and must not block indefinitely. Panics raised from
/// `process` are caught and reported to the error sink.
///
/// A target must not log through the logger it is registered with.
pub trait Target: Send {
    /// Prepare for processing. An error removes the target from the engine.
    fn open(&mut self, errors: ErrorSink) -> Result<()>;

    fn process(&mut self, entry: &LogEntry);

    /// Flush and release resources.
    fn close(&mut self);

    fn name(&self) -> &str {
        "target"
    }
}

/// Shared writer receiving errors about logging itself.
///
/// Cloning is cheap; every clone writes to the same destination, one
/// `write` call at a time.
#[derive(Clone)]
pub struct ErrorSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl ErrorSink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Write one diagnostic line, ignoring failures of the sink itself
    pub fn report(&self, line: impl fmt::Display) {
        let mut writer = self.inner.lock();
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }
}

impl Write for ErrorSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}

impl fmt::Debug for ErrorSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorSink").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_clones_share_destination() {
        let buf = SharedBuf::default();
        let sink = ErrorSink::new(buf.clone());
        let mut other = sink.clone();

        sink.report("first");
        write!(other, "second").unwrap();

        let text = String::from_utf8(buf.0.lock().clone()).unwrap();
        assert_eq!(text, "first\nsecond");
    }
}
