//! # Inbound Ports (Driving Ports / API)
//!
//! The contract this subsystem exposes to the configuration store and the
//! message relay.

use shared_types::{ConfigError, SignedMessage};

/// Message signing and verification.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait MessageAuthenticationApi: Send + Sync {
    /// Sign `message` with the configured secret.
    ///
    /// # Errors
    /// - `ConfigError::MissingSecretKey` if no secret key is set
    fn sign_message(&self, message: &str) -> Result<SignedMessage, ConfigError>;

    /// Verify a signed message.
    ///
    /// Returns `Ok(false)` for any malformed, expired or forged input.
    ///
    /// # Errors
    /// - `ConfigError::MissingSecretKey` if no secret key is set
    fn verify_message(&self, signed: &SignedMessage) -> Result<bool, ConfigError>;
}
