//! # Token Bucket Limiter Service
//!
//! Wraps the bucket state machine in a mutex and reads time through the
//! clock port.

use crate::domain::bucket::{is_valid_configuration, TokenBucketState};
use crate::ports::inbound::RateLimiterApi;
use parking_lot::Mutex;
use shared_types::{
    ConfigError, NoopTelemetry, RateLimitConfig, SecurityEvent, SecurityTelemetry,
    SystemTimeSource, TimeSource,
};
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

/// Default burst size.
pub const DEFAULT_CAPACITY: f64 = 10.0;

/// Default tokens per second.
pub const DEFAULT_REFILL_RATE: f64 = 1.0;

/// Token bucket rate limiter.
///
/// Owns its bucket exclusively; share it as `Arc<TokenBucketLimiter>`.
pub struct TokenBucketLimiter {
    state: Mutex<TokenBucketState>,
    secret_key: Zeroizing<String>,
    clock: Arc<dyn TimeSource>,
    telemetry: Arc<dyn SecurityTelemetry>,
}

impl TokenBucketLimiter {
    /// Create a new rate limiter with a full bucket.
    ///
    /// # Parameters
    ///
    /// - `capacity`: Maximum burst size
    /// - `refill_rate`: Tokens per second
    ///
    /// # Errors
    /// - `ConfigError::InvalidRateLimit` unless both are finite and positive
    pub fn new(capacity: f64, refill_rate: f64) -> Result<Self, ConfigError> {
        if !is_valid_configuration(capacity, refill_rate) {
            return Err(ConfigError::InvalidRateLimit {
                capacity,
                refill_rate,
            });
        }

        let clock = SystemTimeSource::shared();
        Ok(Self {
            state: Mutex::new(TokenBucketState::full(
                capacity,
                refill_rate,
                clock.now_millis(),
            )),
            secret_key: Zeroizing::new(String::new()),
            clock,
            telemetry: NoopTelemetry::shared(),
        })
    }

    /// Limiter configured from `config`.
    ///
    /// # Errors
    /// - `ConfigError::InvalidRateLimit` unless both values are positive
    pub fn from_config(config: &RateLimitConfig) -> Result<Self, ConfigError> {
        Self::new(config.capacity, config.refill_rate)
    }

    /// Replace the clock. Refill is measured from the new clock's "now".
    pub fn with_time_source(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.state.get_mut().last_refill = clock.now_millis();
        self.clock = clock;
        self
    }

    /// Attach a telemetry sink.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn SecurityTelemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Attach a secret key (see [`Self::set_secret_key`]).
    pub fn with_secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Zeroizing::new(key.into());
        self
    }

    /// Replace capacity and refill rate.
    ///
    /// Time elapsed so far is credited at the old rate first. Current tokens
    /// are then clamped to the new capacity; raising the capacity never adds
    /// tokens.
    ///
    /// # Errors
    /// - `ConfigError::InvalidRateLimit` unless both are finite and positive
    pub fn update_configuration(&self, capacity: f64, refill_rate: f64) -> Result<(), ConfigError> {
        if !is_valid_configuration(capacity, refill_rate) {
            return Err(ConfigError::InvalidRateLimit {
                capacity,
                refill_rate,
            });
        }

        let now = self.clock.now_millis();
        {
            let mut state = self.state.lock();
            state.refill(now);
            state.reconfigure(capacity, refill_rate);
        }
        debug!(capacity, refill_rate, "Rate limit reconfigured");
        Ok(())
    }

    /// Overwrite tokens, capacity and rate in one step.
    ///
    /// `tokens` is clamped into `[0, capacity]` and refill restarts now.
    ///
    /// # Errors
    /// - `ConfigError::InvalidRateLimit` unless capacity and rate are finite and positive
    pub fn overwrite_state(
        &self,
        tokens: f64,
        capacity: f64,
        refill_rate: f64,
    ) -> Result<(), ConfigError> {
        if !is_valid_configuration(capacity, refill_rate) {
            return Err(ConfigError::InvalidRateLimit {
                capacity,
                refill_rate,
            });
        }

        let now = self.clock.now_millis();
        self.state.lock().overwrite(tokens, capacity, refill_rate, now);
        Ok(())
    }

    /// Refill the bucket to capacity.
    pub fn reset(&self) {
        let now = self.clock.now_millis();
        let mut state = self.state.lock();
        state.tokens = state.capacity;
        state.last_refill = now;
    }

    /// Current state, after crediting elapsed time.
    pub fn snapshot(&self) -> TokenBucketState {
        let now = self.clock.now_millis();
        let mut state = self.state.lock();
        state.refill(now);
        *state
    }

    /// Maximum tokens in bucket.
    pub fn capacity(&self) -> f64 {
        self.state.lock().capacity
    }

    /// Tokens added per second.
    pub fn refill_rate(&self) -> f64 {
        self.state.lock().refill_rate
    }

    /// Store a key alongside the limiter. Any string, including empty, is
    /// accepted. The previous key is wiped.
    pub fn set_secret_key(&mut self, key: &str) {
        self.secret_key = Zeroizing::new(key.to_string());
    }

    /// The stored key.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Check if rate limited without consuming a token.
    pub fn is_limited(&self) -> bool {
        self.available_tokens() < 1.0
    }
}

impl Default for TokenBucketLimiter {
    fn default() -> Self {
        let clock = SystemTimeSource::shared();
        Self {
            state: Mutex::new(TokenBucketState::full(
                DEFAULT_CAPACITY,
                DEFAULT_REFILL_RATE,
                clock.now_millis(),
            )),
            secret_key: Zeroizing::new(String::new()),
            clock,
            telemetry: NoopTelemetry::shared(),
        }
    }
}

impl std::fmt::Debug for TokenBucketLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBucketLimiter")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl RateLimiterApi for TokenBucketLimiter {
    fn consume(&self, n: f64) -> bool {
        let now = self.clock.now_millis();
        let (admitted, remaining) = {
            let mut state = self.state.lock();
            let admitted = state.try_consume(n, now);
            (admitted, state.tokens)
        };

        if admitted {
            self.telemetry.record(SecurityEvent::RequestAdmitted);
        } else {
            debug!(requested = n, remaining, "Request rate limited");
            self.telemetry.record(SecurityEvent::RequestThrottled);
        }
        admitted
    }

    fn available_tokens(&self) -> f64 {
        self.snapshot().tokens
    }
}
