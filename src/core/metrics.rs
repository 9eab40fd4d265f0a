//! Dispatch metrics for observability
//!
//! Counters describing what the engine did with the entries it was given:
//! how many reached the targets, how many were filtered out, how often a
//! producer had to wait for queue space and how often a target failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for engine observability
///
/// # Example
///
/// ```
/// use rust_log_dispatch::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.filtered(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Entries handed to every active target
    dispatched: AtomicU64,

    /// Entries rejected by the level or open gate
    filtered: AtomicU64,

    /// Times a producer found the queue full and had to block
    backpressure_events: AtomicU64,

    /// Target `process` calls that panicked
    target_failures: AtomicU64,

    /// Fatal entries submitted
    fatal_entries: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            backpressure_events: AtomicU64::new(0),
            target_failures: AtomicU64::new(0),
            fatal_entries: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn backpressure_events(&self) -> u64 {
        self.backpressure_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn target_failures(&self) -> u64 {
        self.target_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fatal_entries(&self) -> u64 {
        self.fatal_entries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_backpressure(&self) -> u64 {
        self.backpressure_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_target_failure(&self) -> u64 {
        self.target_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fatal(&self) -> u64 {
        self.fatal_entries.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of submitted entries that were filtered, as a percentage (0.0 - 100.0)
    pub fn filter_rate(&self) -> f64 {
        let filtered = self.filtered() as f64;
        let total = self.dispatched() as f64 + filtered;
        if total == 0.0 {
            0.0
        } else {
            (filtered / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.backpressure_events.store(0, Ordering::Relaxed);
        self.target_failures.store(0, Ordering::Relaxed);
        self.fatal_entries.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            filtered: AtomicU64::new(self.filtered()),
            backpressure_events: AtomicU64::new(self.backpressure_events()),
            target_failures: AtomicU64::new(self.target_failures()),
            fatal_entries: AtomicU64::new(self.fatal_entries()),
        }
    }
}
