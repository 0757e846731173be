//! # Message Authenticator Service
//!
//! Implements `MessageAuthenticationApi` on top of the domain signing logic,
//! the clock port and the telemetry port.

use crate::domain::signing::{sign_payload, verify_signed_message};
use crate::ports::inbound::MessageAuthenticationApi;
use shared_crypto::SharedSecret;
use shared_types::security::DEFAULT_EXPIRATION_MS;
use shared_types::{
    AuthConfig, ConfigError, NoopTelemetry, SecurityEvent, SecurityTelemetry, SignedMessage,
    SystemTimeSource, TimeSource, TimestampWindow,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// HMAC-SHA256 message authenticator.
///
/// One instance per trust boundary. The secret is either fixed at
/// construction ([`Self::with_secret_key`]) or set through
/// [`Self::set_secret_key`], which needs exclusive access.
#[derive(Clone)]
pub struct MessageAuthenticator {
    secret: Option<SharedSecret>,
    window: TimestampWindow,
    clock: Arc<dyn TimeSource>,
    telemetry: Arc<dyn SecurityTelemetry>,
}

impl MessageAuthenticator {
    /// Authenticator without a key, a 5 minute window and the system clock.
    pub fn new() -> Self {
        Self {
            secret: None,
            window: TimestampWindow::new(DEFAULT_EXPIRATION_MS),
            clock: SystemTimeSource::shared(),
            telemetry: NoopTelemetry::shared(),
        }
    }

    /// Authenticator bound to `key` for its whole lifetime.
    ///
    /// # Errors
    /// - `ConfigError::InvalidSecretKey` if `key` is empty
    pub fn with_secret_key(key: &str) -> Result<Self, ConfigError> {
        let mut auth = Self::new();
        auth.set_secret_key(key)?;
        Ok(auth)
    }

    /// Authenticator configured from `config`, without a key.
    ///
    /// # Errors
    /// - `ConfigError::InvalidExpiration` if the window is not positive
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        let mut auth = Self::new();
        auth.set_expiration_time(config.expiration_ms)?;
        auth.window.future_skew_ms = config.future_skew_ms;
        Ok(auth)
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

    /// Store the shared secret.
    ///
    /// # Errors
    /// - `ConfigError::InvalidSecretKey` if `key` is empty
    pub fn set_secret_key(&mut self, key: &str) -> Result<(), ConfigError> {
        let secret = SharedSecret::new(key).map_err(|_| ConfigError::InvalidSecretKey)?;
        self.secret = Some(secret);
        Ok(())
    }

    /// Whether a secret key is set.
    pub fn has_secret_key(&self) -> bool {
        self.secret.is_some()
    }

    /// Set the replay window in milliseconds.
    ///
    /// # Errors
    /// - `ConfigError::InvalidExpiration` if `ms <= 0`
    pub fn set_expiration_time(&mut self, ms: i64) -> Result<(), ConfigError> {
        if ms <= 0 {
            return Err(ConfigError::InvalidExpiration { value_ms: ms });
        }
        self.window.max_age_ms = Some(ms as u64);
        Ok(())
    }

    /// The replay window in milliseconds.
    pub fn expiration_time(&self) -> u64 {
        self.window.max_age_ms.unwrap_or(DEFAULT_EXPIRATION_MS)
    }

    /// Verify a wire-form (JSON) signed message.
    ///
    /// Unparseable input is `Ok(false)`.
    ///
    /// # Errors
    /// - `ConfigError::MissingSecretKey` if no secret key is set
    pub fn verify_serialized(&self, wire: &str) -> Result<bool, ConfigError> {
        self.secret()?;
        match serde_json::from_str::<SignedMessage>(wire) {
            Ok(signed) => self.verify_message(&signed),
            Err(_) => {
                debug!(reason = "malformed_envelope", "Signed message rejected");
                self.telemetry.record(SecurityEvent::VerificationFailed {
                    reason: "malformed_envelope",
                });
                Ok(false)
            }
        }
    }

    /// The clock this authenticator reads.
    pub fn time_source(&self) -> Arc<dyn TimeSource> {
        Arc::clone(&self.clock)
    }

    fn secret(&self) -> Result<&SharedSecret, ConfigError> {
        self.secret.as_ref().ok_or(ConfigError::MissingSecretKey)
    }
}

impl Default for MessageAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageAuthenticator")
            .field("has_secret_key", &self.has_secret_key())
            .field("window", &self.window)
            .finish()
    }
}

impl MessageAuthenticationApi for MessageAuthenticator {
    fn sign_message(&self, message: &str) -> Result<SignedMessage, ConfigError> {
        let secret = self.secret()?;
        let signed = sign_payload(secret, message, self.clock.now_millis())
            .map_err(|_| ConfigError::InvalidSecretKey)?;

        self.telemetry.record(SecurityEvent::MessageSigned);
        Ok(signed)
    }

    fn verify_message(&self, signed: &SignedMessage) -> Result<bool, ConfigError> {
        let secret = self.secret()?;
        let now = self.clock.now_millis();

        match verify_signed_message(secret, &self.window, now, signed) {
            Ok(()) => Ok(true),
            Err(failure) => {
                debug!(reason = failure.as_str(), now, "Signed message rejected");
                self.telemetry.record(SecurityEvent::VerificationFailed {
                    reason: failure.as_str(),
                });
                Ok(false)
            }
        }
    }
}
