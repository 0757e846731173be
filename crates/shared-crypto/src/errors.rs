//! Crypto error types.
//!
//! These never leave the workspace's components in raw form; each component
//! maps them into its own caller-facing taxonomy.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Encryption failed
    #[error("Encryption failed")]
    EncryptionFailed,

    /// Decryption failed (wrong key, tampered data or wrong tag)
    #[error("Decryption failed")]
    DecryptionFailed,

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// A fixed-size envelope field has the wrong length
    #[error("Invalid {field} length: expected {expected}, got {actual}")]
    InvalidFieldLength {
        /// Field name (`iv`, `tag`, `salt`)
        field: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Envelope written with a cipher suite this build does not know
    #[error("Unsupported cipher suite version: {0}")]
    UnsupportedSuite(u8),

    /// Empty secret material
    #[error("Secret material must not be empty")]
    EmptySecret,
}
