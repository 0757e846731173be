//! # Cipher Errors
//!
//! Errors of the encrypting direction. The decrypting direction only ever
//! returns `shared_types::DecryptionError`.

use shared_types::ValidationError;
use thiserror::Error;

/// Errors that can occur while encrypting a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Caller input was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The cipher or the blocking pool failed
    #[error("Encryption failed")]
    EncryptionFailed,
}
