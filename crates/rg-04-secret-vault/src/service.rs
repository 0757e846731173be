//! # Secret Vault Service

use crate::domain::envelope::{SecretEnvelope, VaultFailure};
use crate::domain::errors::VaultError;
use crate::ports::inbound::SecretVaultApi;
use shared_crypto::{open, seal, CipherSuite};
use shared_types::{
    DecryptionError, NoopTelemetry, SecurityEvent, SecurityTelemetry, ValidationError,
};
use std::sync::Arc;
use tracing::debug;

/// At-rest token vault. Stateless apart from the suite it writes with.
#[derive(Clone)]
pub struct SecretVault {
    suite: CipherSuite,
    telemetry: Arc<dyn SecurityTelemetry>,
}

impl SecretVault {
    /// Vault writing the current cipher suite.
    pub fn new() -> Self {
        Self {
            suite: CipherSuite::CURRENT,
            telemetry: NoopTelemetry::shared(),
        }
    }

    /// Attach a telemetry sink.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn SecurityTelemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// [`SecretVaultApi::encrypt_token`] with key derivation on the blocking
    /// pool.
    ///
    /// # Errors
    /// Same as the synchronous variant.
    pub async fn encrypt_token_async(
        &self,
        token: String,
        password: String,
    ) -> Result<String, VaultError> {
        let vault = self.clone();
        tokio::task::spawn_blocking(move || vault.encrypt_token(&token, &password))
            .await
            .map_err(|_| VaultError::EncryptionFailed)?
    }

    /// [`SecretVaultApi::decrypt_token`] with key derivation on the blocking
    /// pool.
    ///
    /// # Errors
    /// Same as the synchronous variant.
    pub async fn decrypt_token_async(
        &self,
        encrypted: String,
        password: String,
    ) -> Result<String, DecryptionError> {
        let vault = self.clone();
        tokio::task::spawn_blocking(move || vault.decrypt_token(&encrypted, &password))
            .await
            .map_err(|_| DecryptionError::token())?
    }

    fn reject(&self, failure: VaultFailure) -> DecryptionError {
        debug!(reason = failure.as_str(), "Token decryption failed");
        self.telemetry.record(SecurityEvent::DecryptionFailed {
            reason: failure.as_str(),
        });
        DecryptionError::token()
    }
}

impl Default for SecretVault {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SecretVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretVault")
            .field("suite", &self.suite)
            .finish()
    }
}

impl SecretVaultApi for SecretVault {
    fn encrypt_token(&self, token: &str, password: &str) -> Result<String, VaultError> {
        if password.is_empty() {
            return Err(ValidationError::EmptyPassword.into());
        }

        let sealed = seal(self.suite, password.as_bytes(), token.as_bytes())
            .map_err(|_| VaultError::EncryptionFailed)?;
        Ok(SecretEnvelope::from(sealed).to_hex())
    }

    fn decrypt_token(&self, encrypted: &str, password: &str) -> Result<String, DecryptionError> {
        let envelope = SecretEnvelope::from_hex(encrypted).map_err(|f| self.reject(f))?;

        let plaintext = open(password.as_bytes(), envelope.sealed())
            .map_err(|_| self.reject(VaultFailure::Authentication))?;

        String::from_utf8(plaintext).map_err(|_| self.reject(VaultFailure::Utf8))
    }
}
