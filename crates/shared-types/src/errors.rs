//! # Error Types
//!
//! The error taxonomy shared by every component.
//!
//! - [`ConfigError`]: invalid setup. Thrown immediately, never retried.
//! - [`ValidationError`]: invalid caller input to an encrypting operation.
//! - [`DecryptionError`]: any failure on a decrypting path. The message is
//!   fixed and deliberately uninformative so callers cannot be used as a
//!   decryption oracle.
//!
//! Verification failures are not errors; `verify_*`/`validate_*` operations
//! return `false`.

use std::fmt;
use thiserror::Error;

/// Invalid component configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// An operation needs a secret key and none has been set.
    #[error("Secret key is not set")]
    MissingSecretKey,

    /// The provided secret key is empty.
    #[error("Secret key must be a non-empty string")]
    InvalidSecretKey,

    /// Expiration window outside the accepted range.
    #[error("Invalid expiration time: {value_ms} ms")]
    InvalidExpiration {
        /// The rejected value in milliseconds
        value_ms: i64,
    },

    /// Token bucket parameters must both be strictly positive.
    #[error("Invalid rate limit: capacity={capacity}, refill_rate={refill_rate}")]
    InvalidRateLimit {
        /// Rejected capacity
        capacity: f64,
        /// Rejected refill rate (tokens per second)
        refill_rate: f64,
    },

    /// A configuration field failed validation.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field path, e.g. `rate_limit.capacity`
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Invalid input to an encrypting operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The encryption secret is empty.
    #[error("Secret must be a non-empty string")]
    EmptySecret,

    /// The vault password is empty.
    #[error("Password must be a non-empty string")]
    EmptyPassword,
}

/// Opaque decryption failure.
///
/// Every decrypting path (malformed envelope, wrong secret, tampered
/// ciphertext, expired message) collapses into this type. The message never
/// names the check that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DecryptionError {
    message: String,
}

impl DecryptionError {
    /// Generic failure of a structured payload decryption.
    pub const PAYLOAD: &'static str = "Failed to decrypt payload";

    /// Generic failure of an at-rest token decryption.
    pub const TOKEN: &'static str = "Failed to decrypt token: invalid password or corrupted data";

    /// Failure on the payload path.
    pub fn payload() -> Self {
        Self {
            message: Self::PAYLOAD.to_string(),
        }
    }

    /// Failure on the at-rest vault path.
    pub fn token() -> Self {
        Self {
            message: Self::TOKEN.to_string(),
        }
    }

    /// Failure on the rate-limited envelope path, wrapping a generic cause.
    pub fn with_rate_limit(cause: impl fmt::Display) -> Self {
        Self {
            message: format!("Failed to decrypt with rate limit: {cause}"),
        }
    }

    /// The caller-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
