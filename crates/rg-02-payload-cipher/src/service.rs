//! # Payload Cipher Service
//!
//! Implements `PayloadCipherApi`: key derivation and AES-256-GCM from
//! `shared-crypto`, the envelope codec from the domain layer, expiry from the
//! clock port.

use crate::domain::envelope::{decode_envelope, encode_envelope, EnvelopeFailure};
use crate::domain::errors::CipherError;
use crate::ports::inbound::PayloadCipherApi;
use shared_crypto::{open, seal, CipherSuite};
use shared_types::security::DEFAULT_EXPIRATION_MS;
use shared_types::{
    CipherConfig, ConfigError, DecryptionError, EncryptedMessage, NoopTelemetry, SecurityEvent,
    SecurityTelemetry, SystemTimeSource, TimeSource, TimestampWindow, ValidationError,
};
use std::sync::Arc;
use tracing::debug;

/// Password-based payload cipher.
///
/// Holds no secret; the secret is supplied per call. Cheap to clone.
#[derive(Clone)]
pub struct PayloadCipher {
    window: TimestampWindow,
    suite: CipherSuite,
    clock: Arc<dyn TimeSource>,
    telemetry: Arc<dyn SecurityTelemetry>,
}

impl PayloadCipher {
    /// Cipher with a 5 minute expiry and the system clock.
    pub fn new() -> Self {
        Self {
            window: TimestampWindow::new(DEFAULT_EXPIRATION_MS),
            suite: CipherSuite::CURRENT,
            clock: SystemTimeSource::shared(),
            telemetry: NoopTelemetry::shared(),
        }
    }

    /// Cipher configured from `config`.
    ///
    /// # Errors
    /// - `ConfigError::InvalidExpiration` if the window is negative
    pub fn from_config(config: &CipherConfig) -> Result<Self, ConfigError> {
        let mut cipher = Self::new();
        cipher.set_expiration_time(config.expiration_ms)?;
        Ok(cipher)
    }

    /// Replace the clock.
    pub fn with_time_source(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Attach a telemetry sink.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn SecurityTelemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Set the expiry window in milliseconds; `0` means never expire.
    ///
    /// # Errors
    /// - `ConfigError::InvalidExpiration` if `ms < 0`
    pub fn set_expiration_time(&mut self, ms: i64) -> Result<(), ConfigError> {
        if ms < 0 {
            return Err(ConfigError::InvalidExpiration { value_ms: ms });
        }
        self.window.max_age_ms = (ms > 0).then_some(ms as u64);
        Ok(())
    }

    /// The expiry window in milliseconds (`0` = never).
    pub fn expiration_time(&self) -> u64 {
        self.window.max_age_ms.unwrap_or(0)
    }

    /// Decrypt a wire-form (JSON) encrypted message.
    ///
    /// # Errors
    /// - `DecryptionError` if the JSON is missing fields or mistyped, and in
    ///   every case [`PayloadCipherApi::decrypt_payload`] fails
    pub fn decrypt_payload_str(&self, wire: &str, secret: &str) -> Result<String, DecryptionError> {
        let message: EncryptedMessage =
            serde_json::from_str(wire).map_err(|_| self.reject(EnvelopeFailure::Malformed))?;
        self.decrypt_payload(&message, secret)
    }

    /// [`PayloadCipherApi::encrypt_payload`] with key derivation on the
    /// blocking pool.
    ///
    /// # Errors
    /// Same as the synchronous variant.
    pub async fn encrypt_payload_async(
        &self,
        payload: String,
        secret: String,
    ) -> Result<EncryptedMessage, CipherError> {
        let cipher = self.clone();
        tokio::task::spawn_blocking(move || cipher.encrypt_payload(&payload, &secret))
            .await
            .map_err(|_| CipherError::EncryptionFailed)?
    }

    /// [`PayloadCipherApi::decrypt_payload`] with key derivation on the
    /// blocking pool.
    ///
    /// # Errors
    /// Same as the synchronous variant.
    pub async fn decrypt_payload_async(
        &self,
        encrypted: EncryptedMessage,
        secret: String,
    ) -> Result<String, DecryptionError> {
        let cipher = self.clone();
        tokio::task::spawn_blocking(move || cipher.decrypt_payload(&encrypted, &secret))
            .await
            .map_err(|_| DecryptionError::payload())?
    }

    fn reject(&self, failure: EnvelopeFailure) -> DecryptionError {
        debug!(reason = failure.as_str(), "Payload decryption failed");
        self.telemetry.record(SecurityEvent::DecryptionFailed {
            reason: failure.as_str(),
        });
        DecryptionError::payload()
    }
}

impl Default for PayloadCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadCipher")
            .field("window", &self.window)
            .field("suite", &self.suite)
            .finish()
    }
}

impl PayloadCipherApi for PayloadCipher {
    fn encrypt_payload(
        &self,
        payload: &str,
        secret: &str,
    ) -> Result<EncryptedMessage, CipherError> {
        if secret.is_empty() {
            return Err(ValidationError::EmptySecret.into());
        }

        let sealed = seal(self.suite, secret.as_bytes(), payload.as_bytes())
            .map_err(|_| CipherError::EncryptionFailed)?;

        self.telemetry.record(SecurityEvent::PayloadEncrypted);
        Ok(encode_envelope(&sealed, self.clock.now_millis()))
    }

    fn decrypt_payload(
        &self,
        encrypted: &EncryptedMessage,
        secret: &str,
    ) -> Result<String, DecryptionError> {
        let sealed = decode_envelope(encrypted).map_err(|failure| self.reject(failure))?;

        // Expiration 0 disables the timestamp check entirely.
        if self.window.max_age_ms.is_some()
            && self
                .window
                .check(encrypted.timestamp as f64, self.clock.now_millis())
                .is_err()
        {
            return Err(self.reject(EnvelopeFailure::Expired));
        }

        let plaintext = open(secret.as_bytes(), &sealed)
            .map_err(|_| self.reject(EnvelopeFailure::Authentication))?;

        String::from_utf8(plaintext).map_err(|_| self.reject(EnvelopeFailure::Utf8))
    }
}
