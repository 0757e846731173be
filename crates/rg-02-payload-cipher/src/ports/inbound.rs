//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::CipherError;
use shared_types::{DecryptionError, EncryptedMessage};

/// Payload encryption and decryption.
pub trait PayloadCipherApi: Send + Sync {
    /// Encrypt `payload` under a key derived from `secret`.
    ///
    /// # Errors
    /// - `CipherError::Validation` if `secret` is empty
    fn encrypt_payload(&self, payload: &str, secret: &str)
        -> Result<EncryptedMessage, CipherError>;

    /// Decrypt and authenticate `encrypted`.
    ///
    /// # Errors
    /// - `DecryptionError` for any malformed, expired, tampered or
    ///   wrong-secret input
    fn decrypt_payload(
        &self,
        encrypted: &EncryptedMessage,
        secret: &str,
    ) -> Result<String, DecryptionError>;
}
