//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::VaultError;
use shared_types::DecryptionError;

/// At-rest token encryption.
pub trait SecretVaultApi: Send + Sync {
    /// Encrypt `token` under `password`, returning a hex string.
    ///
    /// # Errors
    /// - `VaultError::Validation` if `password` is empty
    fn encrypt_token(&self, token: &str, password: &str) -> Result<String, VaultError>;

    /// Decrypt a hex string produced by [`Self::encrypt_token`].
    ///
    /// # Errors
    /// - `DecryptionError` for a wrong password or any corrupted input
    fn decrypt_token(&self, encrypted: &str, password: &str) -> Result<String, DecryptionError>;
}
