//! Shared test targets

#![allow(dead_code)]

use crossbeam_channel::Receiver;
use rust_log_dispatch::prelude::*;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every entry it receives
#[derive(Clone, Default)]
pub struct CaptureTarget {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl CaptureTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `delay` before recording each entry
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Target for CaptureTarget {
    fn open(&mut self, _errors: ErrorSink) -> Result<()> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn process(&mut self, entry: &LogEntry) {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.entries.lock().unwrap().push(entry.clone());
    }

    fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &str {
        "capture"
    }
}

/// Refuses to open
pub struct FailingOpenTarget;

impl Target for FailingOpenTarget {
    fn open(&mut self, _errors: ErrorSink) -> Result<()> {
        Err(LoggerError::other("device unavailable"))
    }

    fn process(&mut self, _entry: &LogEntry) {
        panic!("a target that failed to open must not receive entries");
    }

    fn close(&mut self) {}

    fn name(&self) -> &str {
        "failing-open"
    }
}

/// Panics on every entry
pub struct PanickingTarget;

impl Target for PanickingTarget {
    fn open(&mut self, _errors: ErrorSink) -> Result<()> {
        Ok(())
    }

    fn process(&mut self, entry: &LogEntry) {
        panic!("cannot handle '{}'", entry.message);
    }

    fn close(&mut self) {}

    fn name(&self) -> &str {
        "panicking"
    }
}

/// Waits for a token on `gate` before accepting each entry
pub struct GatedTarget {
    pub gate: Receiver<()>,
    pub inner: CaptureTarget,
}

impl Target for GatedTarget {
    fn open(&mut self, errors: ErrorSink) -> Result<()> {
        self.inner.open(errors)
    }

    fn process(&mut self, entry: &LogEntry) {
        let _ = self.gate.recv();
        self.inner.process(entry);
    }

    fn close(&mut self) {
        self.inner.close();
    }

    fn name(&self) -> &str {
        "gated"
    }
}

/// In-memory error sink destination
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Root logger delivering only to `target`, with meta errors kept in memory
pub fn capture_logger(target: &CaptureTarget) -> (Logger, SharedBuffer) {
    let errors = SharedBuffer::default();
    let logger = Logger::builder()
        .error_writer(errors.clone())
        .target(target.clone())
        .build()
        .expect("logger opens");
    (logger, errors)
}
