//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::IssuerError;
use serde_json::Value;
use shared_types::{ConfigError, DecryptionError};

/// Token issuance and rate-limit envelopes.
pub trait RateLimitTokenApi: Send + Sync {
    /// Sign `payload` into a token valid for `expiration_minutes`.
    ///
    /// # Errors
    /// - `IssuerError::Config` if the authenticator has no secret key
    fn create_rate_limit_token(
        &self,
        payload: &Value,
        expiration_minutes: u64,
    ) -> Result<String, IssuerError>;

    /// Check signature, signing window and embedded expiration.
    ///
    /// Any malformed or failing token is `Ok(false)`.
    ///
    /// # Errors
    /// - `ConfigError::MissingSecretKey` if the authenticator has no secret key
    fn validate_rate_limit_token(&self, token: &str) -> Result<bool, ConfigError>;

    /// Encrypt `data` and attach the local bucket state.
    ///
    /// # Errors
    /// - `IssuerError::Cipher` if `secret` is empty
    fn encrypt_with_rate_limit(&self, data: &str, secret: &str) -> Result<String, IssuerError>;

    /// Decrypt an envelope from [`Self::encrypt_with_rate_limit`].
    ///
    /// # Errors
    /// - `DecryptionError` ("Failed to decrypt with rate limit: ...") for
    ///   malformed JSON or any payload decryption failure
    fn decrypt_with_rate_limit(&self, encrypted: &str, secret: &str)
        -> Result<String, DecryptionError>;
}
