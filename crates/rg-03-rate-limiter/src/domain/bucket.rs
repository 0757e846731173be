//! # Token Bucket
//!
//! ```text
//!            refill (elapsed * rate, capped)
//!   ┌──────────────────────────────────────────┐
//!   ▼                                          │
//! [tokens] ──consume(n), tokens >= n──→ [tokens - n]
//!   │
//!   └──consume(n), tokens < n──→ rejected, unchanged
//! ```
//!
//! Invariant: `0 <= tokens <= capacity` after every operation.

use shared_types::Timestamp;

/// Snapshot of a token bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenBucketState {
    /// Tokens currently available.
    pub tokens: f64,
    /// Maximum tokens in bucket.
    pub capacity: f64,
    /// Tokens added per second.
    pub refill_rate: f64,
    /// Last time elapsed time was credited.
    pub last_refill: Timestamp,
}

impl TokenBucketState {
    /// A full bucket as of `now`.
    pub fn full(capacity: f64, refill_rate: f64, now: Timestamp) -> Self {
        Self {
            tokens: capacity,
            capacity,
            refill_rate,
            last_refill: now,
        }
    }

    /// Credit the time elapsed since the last refill.
    ///
    /// A clock that moved backwards credits nothing and keeps the later
    /// `last_refill`, so the same interval is never credited twice.
    pub fn refill(&mut self, now: Timestamp) {
        if now <= self.last_refill {
            return;
        }

        let elapsed_secs = (now - self.last_refill) as f64 / 1000.0;
        self.tokens = (self.tokens + elapsed_secs * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }

    /// Take `n` tokens if available.
    ///
    /// `n == 0` succeeds without touching the bucket; negative or
    /// non-finite amounts are rejected.
    pub fn try_consume(&mut self, n: f64, now: Timestamp) -> bool {
        if n == 0.0 {
            return true;
        }
        if !n.is_finite() || n < 0.0 {
            return false;
        }

        self.refill(now);

        if self.tokens >= n {
            self.tokens -= n;
            true
        } else {
            false
        }
    }

    /// Replace capacity and rate, clamping (never raising) the current tokens.
    pub fn reconfigure(&mut self, capacity: f64, refill_rate: f64) {
        self.capacity = capacity;
        self.refill_rate = refill_rate;
        self.tokens = self.tokens.min(capacity);
    }

    /// Overwrite the whole bucket, clamping `tokens` into `[0, capacity]`.
    pub fn overwrite(&mut self, tokens: f64, capacity: f64, refill_rate: f64, now: Timestamp) {
        self.capacity = capacity;
        self.refill_rate = refill_rate;
        self.tokens = if tokens.is_finite() {
            tokens.clamp(0.0, capacity)
        } else {
            0.0
        };
        self.last_refill = now;
    }
}

/// Whether `capacity` and `refill_rate` describe a usable bucket.
pub fn is_valid_configuration(capacity: f64, refill_rate: f64) -> bool {
    capacity.is_finite() && capacity > 0.0 && refill_rate.is_finite() && refill_rate > 0.0
}
