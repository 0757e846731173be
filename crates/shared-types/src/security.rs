//! # Timestamp Window Validation
//!
//! Shared replay-window policy used by the authenticator and the payload
//! cipher.
//!
//! ## Time Window
//!
//! Valid range: `now - max_age <= timestamp <= now + future_skew`. Both ends
//! are inclusive, so a message signed at `t0` with a window `w` is still
//! valid at exactly `t0 + w` and rejected one millisecond later.

use crate::time::Timestamp;

/// Default replay window (5 minutes).
pub const DEFAULT_EXPIRATION_MS: u64 = 5 * 60 * 1000;

/// Tolerated clock skew for timestamps from the future (60 seconds).
pub const MAX_FUTURE_SKEW_MS: u64 = 60_000;

/// Why a timestamp was rejected.
///
/// Used for logging and telemetry only; it never reaches an untrusted caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampRejection {
    /// Not a finite number.
    NotFinite,
    /// Further in the future than the tolerated skew.
    FromFuture,
    /// Older than the replay window.
    Expired,
}

impl TimestampRejection {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFinite => "timestamp_not_finite",
            Self::FromFuture => "timestamp_from_future",
            Self::Expired => "timestamp_expired",
        }
    }
}

/// Replay window policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampWindow {
    /// Maximum age in milliseconds; `None` disables the age check.
    pub max_age_ms: Option<u64>,
    /// Tolerated clock skew for future timestamps in milliseconds.
    pub future_skew_ms: u64,
}

impl TimestampWindow {
    /// Window with an age limit and the default future skew.
    pub fn new(max_age_ms: u64) -> Self {
        Self {
            max_age_ms: Some(max_age_ms),
            future_skew_ms: MAX_FUTURE_SKEW_MS,
        }
    }

    /// Checks `timestamp` (ms epoch, possibly non-integral when it came from
    /// untrusted JSON) against this window at time `now`.
    pub fn check(&self, timestamp: f64, now: Timestamp) -> Result<(), TimestampRejection> {
        if !timestamp.is_finite() {
            return Err(TimestampRejection::NotFinite);
        }

        let now = now as f64;

        if timestamp > now + self.future_skew_ms as f64 {
            return Err(TimestampRejection::FromFuture);
        }

        if let Some(max_age) = self.max_age_ms {
            if now - timestamp > max_age as f64 {
                return Err(TimestampRejection::Expired);
            }
        }

        Ok(())
    }
}

impl Default for TimestampWindow {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRATION_MS)
    }
}
