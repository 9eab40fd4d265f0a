//! Outstanding-entry tracking for the fatal drain

use parking_lot::{Condvar, Mutex};

/// Counts entries that were queued but not yet dispatched.
///
/// Producers call [`begin`](Self::begin) before queueing, the dispatcher
/// calls [`finish`](Self::finish) after every target has seen the entry, and
/// [`wait_drained`](Self::wait_drained) blocks until the count is zero.
#[derive(Debug, Default)]
pub(crate) struct PendingEntries {
    count: Mutex<usize>,
    drained: Condvar,
}

impl PendingEntries {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin(&self) {
        *self.count.lock() += 1;
    }

    pub(crate) fn finish(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.drained.notify_all();
        }
    }

    pub(crate) fn current(&self) -> usize {
        *self.count.lock()
    }

    /// Block until every begun entry has finished. No timeout.
    pub(crate) fn wait_drained(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.drained.wait(&mut count);
        }
    }
}
