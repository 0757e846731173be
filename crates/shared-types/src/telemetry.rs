//! # Telemetry Port
//!
//! Optional sink for security-relevant events. Components call it but never
//! depend on it for correctness; the default sink discards everything.

use std::sync::Arc;

/// A security-relevant event.
///
/// Reasons are stable, low-cardinality labels suitable for metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityEvent {
    /// A message was signed.
    MessageSigned,
    /// A signed message failed verification.
    VerificationFailed {
        /// Which check failed
        reason: &'static str,
    },
    /// A payload was encrypted.
    PayloadEncrypted,
    /// A decryption failed.
    DecryptionFailed {
        /// Which check failed
        reason: &'static str,
    },
    /// The limiter admitted a request.
    RequestAdmitted,
    /// The limiter rejected a request.
    RequestThrottled,
    /// A rate-limit token was issued.
    TokenIssued,
    /// A rate-limit token failed validation.
    TokenRejected {
        /// Which check failed
        reason: &'static str,
    },
    /// Envelope rate-limit metadata was seen and ignored.
    RateLimitInfoIgnored,
    /// Envelope rate-limit metadata was applied to the local limiter.
    RateLimitInfoApplied,
}

impl SecurityEvent {
    /// Stable event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MessageSigned => "message_signed",
            Self::VerificationFailed { .. } => "verification_failed",
            Self::PayloadEncrypted => "payload_encrypted",
            Self::DecryptionFailed { .. } => "decryption_failed",
            Self::RequestAdmitted => "request_admitted",
            Self::RequestThrottled => "request_throttled",
            Self::TokenIssued => "token_issued",
            Self::TokenRejected { .. } => "token_rejected",
            Self::RateLimitInfoIgnored => "rate_limit_info_ignored",
            Self::RateLimitInfoApplied => "rate_limit_info_applied",
        }
    }

    /// Failure reason, when the event carries one.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::VerificationFailed { reason }
            | Self::DecryptionFailed { reason }
            | Self::TokenRejected { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Sink for [`SecurityEvent`]s.
///
/// Implementations must be cheap and must not panic.
pub trait SecurityTelemetry: Send + Sync {
    /// Records one event.
    fn record(&self, event: SecurityEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl NoopTelemetry {
    /// Shared handle, the form components store.
    pub fn shared() -> Arc<dyn SecurityTelemetry> {
        Arc::new(Self)
    }
}

impl SecurityTelemetry for NoopTelemetry {
    fn record(&self, _event: SecurityEvent) {}
}
