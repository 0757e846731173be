//! # Vault Errors

use shared_types::ValidationError;
use thiserror::Error;

/// Errors that can occur while encrypting a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// Caller input was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The cipher or the blocking pool failed
    #[error("Token encryption failed")]
    EncryptionFailed,
}
