//! # Issuer Errors

use rg_02_payload_cipher::CipherError;
use shared_types::ConfigError;
use thiserror::Error;

/// Errors from issuing tokens or building rate-limit envelopes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IssuerError {
    /// The authenticator or limiter is misconfigured
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Encrypting the payload failed
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// The payload could not be serialized to JSON
    #[error("Failed to serialize token payload")]
    Serialization,

    /// The local bucket has no token for this request
    #[error("Rate limit exceeded")]
    RateLimited,
}
