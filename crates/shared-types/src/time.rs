//! Clock port.
//!
//! Every time-dependent component reads the clock through [`TimeSource`] so
//! tests can drive simulated time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Time source for consistent timestamp handling.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now_millis(&self) -> Timestamp;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    /// Shared handle, the form components store.
    pub fn shared() -> Arc<dyn TimeSource> {
        Arc::new(Self)
    }
}

impl TimeSource for SystemTimeSource {
    /// A clock set before the epoch reads as 0 rather than panicking.
    fn now_millis(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }
}

/// Manually driven time source for deterministic tests and simulations.
#[derive(Debug)]
pub struct MockTimeSource {
    time: AtomicU64,
}

impl MockTimeSource {
    /// Starts the clock at `initial` milliseconds.
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    /// Starts the clock at `initial` and wraps it for sharing.
    pub fn shared(initial: Timestamp) -> Arc<Self> {
        Arc::new(Self::new(initial))
    }

    /// Moves the clock forward by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute value (may move backwards).
    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now_millis(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}
