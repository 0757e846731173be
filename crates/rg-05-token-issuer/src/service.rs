//! # Token Issuer Service
//!
//! Implements `RateLimitTokenApi` over the three component services. Time is
//! read through the authenticator's clock.

use crate::domain::claims::{build_claims, decode_claims, is_unexpired, TokenFailure};
use crate::domain::errors::IssuerError;
use crate::ports::inbound::RateLimitTokenApi;
use rg_01_message_auth::{MessageAuthenticationApi, MessageAuthenticator};
use rg_02_payload_cipher::{CipherError, PayloadCipher, PayloadCipherApi};
use rg_03_rate_limiter::{RateLimiterApi, TokenBucketLimiter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{
    ConfigError, DecryptionError, EncryptedMessage, NoopTelemetry, RateLimitEnvelope,
    RateLimitInfo, RateLimitInfoPolicy, SecurityConfig, SecurityEvent, SecurityTelemetry,
    SignedMessage, SystemTimeSource, TimeSource,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default token lifetime.
pub const DEFAULT_EXPIRATION_MINUTES: u64 = 5;

/// Received rate-limit envelope. The sender's snapshot stays untyped until a
/// policy parses it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceivedEnvelope {
    encrypted_message: EncryptedMessage,
    #[serde(default)]
    rate_limit_info: Option<Value>,
}

/// Issues and validates rate-limit tokens.
///
/// Clones share the limiter.
#[derive(Clone)]
pub struct RateLimitedTokenIssuer {
    authenticator: MessageAuthenticator,
    limiter: Arc<TokenBucketLimiter>,
    cipher: PayloadCipher,
    policy: RateLimitInfoPolicy,
    default_expiration_minutes: u64,
    telemetry: Arc<dyn SecurityTelemetry>,
}

impl RateLimitedTokenIssuer {
    /// Issuer over already configured components.
    ///
    /// The components should share one clock; the issuer itself reads the
    /// authenticator's.
    pub fn new(
        authenticator: MessageAuthenticator,
        limiter: Arc<TokenBucketLimiter>,
        cipher: PayloadCipher,
    ) -> Self {
        Self {
            authenticator,
            limiter,
            cipher,
            policy: RateLimitInfoPolicy::default(),
            default_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            telemetry: NoopTelemetry::shared(),
        }
    }

    /// Issuer built from `config`, signing with `secret_key`.
    ///
    /// # Errors
    /// - `ConfigError` if `config` fails validation or `secret_key` is empty
    pub fn from_config(config: &SecurityConfig, secret_key: &str) -> Result<Self, ConfigError> {
        Self::from_config_with_clock(config, secret_key, SystemTimeSource::shared())
    }

    /// [`Self::from_config`] with every component reading `clock`.
    ///
    /// # Errors
    /// - `ConfigError` if `config` fails validation or `secret_key` is empty
    pub fn from_config_with_clock(
        config: &SecurityConfig,
        secret_key: &str,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut authenticator =
            MessageAuthenticator::from_config(&config.auth)?.with_time_source(Arc::clone(&clock));
        authenticator.set_secret_key(secret_key)?;

        let limiter = TokenBucketLimiter::from_config(&config.rate_limit)?
            .with_time_source(Arc::clone(&clock));
        let cipher = PayloadCipher::from_config(&config.cipher)?.with_time_source(clock);

        Ok(Self::new(authenticator, Arc::new(limiter), cipher)
            .with_policy(config.token.rate_limit_info)
            .with_default_expiration_minutes(config.token.default_expiration_minutes))
    }

    /// Choose how received rate-limit metadata is handled.
    pub fn with_policy(mut self, policy: RateLimitInfoPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Lifetime used by [`Self::create_default_token`].
    pub fn with_default_expiration_minutes(mut self, minutes: u64) -> Self {
        self.default_expiration_minutes = minutes;
        self
    }

    /// Attach a telemetry sink.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn SecurityTelemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// The signing component.
    pub fn authenticator(&self) -> &MessageAuthenticator {
        &self.authenticator
    }

    /// The shared limiter.
    pub fn limiter(&self) -> &Arc<TokenBucketLimiter> {
        &self.limiter
    }

    /// The payload cipher.
    pub fn cipher(&self) -> &PayloadCipher {
        &self.cipher
    }

    /// Current handling of received rate-limit metadata.
    pub fn policy(&self) -> RateLimitInfoPolicy {
        self.policy
    }

    /// Token for any serializable payload, valid for the default lifetime.
    ///
    /// # Errors
    /// - `IssuerError::Serialization` if `payload` does not serialize
    /// - `IssuerError::Config` if the authenticator has no secret key
    pub fn create_default_token<T: Serialize>(&self, payload: &T) -> Result<String, IssuerError> {
        let value = serde_json::to_value(payload).map_err(|_| IssuerError::Serialization)?;
        self.create_rate_limit_token(&value, self.default_expiration_minutes)
    }

    /// Take one token from the limiter, then issue a rate-limit token.
    ///
    /// # Errors
    /// - `IssuerError::RateLimited` if the bucket is empty
    /// - `IssuerError::Config` if the authenticator has no secret key
    pub fn issue_rate_limited_token(
        &self,
        payload: &Value,
        expiration_minutes: u64,
    ) -> Result<String, IssuerError> {
        if !self.authenticator.has_secret_key() {
            return Err(ConfigError::MissingSecretKey.into());
        }
        if !self.limiter.try_acquire() {
            return Err(IssuerError::RateLimited);
        }
        self.create_rate_limit_token(payload, expiration_minutes)
    }

    /// The payload of a valid token, `None` if the token does not validate.
    ///
    /// # Errors
    /// - `ConfigError::MissingSecretKey` if the authenticator has no secret key
    pub fn token_payload(&self, token: &str) -> Result<Option<Value>, ConfigError> {
        Ok(self.check_token(token)?.ok())
    }

    fn check_token(&self, token: &str) -> Result<Result<Value, TokenFailure>, ConfigError> {
        if !self.authenticator.has_secret_key() {
            return Err(ConfigError::MissingSecretKey);
        }

        let Ok(signed) = serde_json::from_str::<SignedMessage>(token) else {
            return Ok(Err(self.reject(TokenFailure::Malformed)));
        };
        if !self.authenticator.verify_message(&signed)? {
            return Ok(Err(self.reject(TokenFailure::Signature)));
        }

        let claims = match decode_claims(&signed) {
            Ok(claims) => claims,
            Err(failure) => return Ok(Err(self.reject(failure))),
        };
        if !is_unexpired(&claims, self.now()) {
            return Ok(Err(self.reject(TokenFailure::Expired)));
        }

        Ok(Ok(claims.payload))
    }

    /// [`RateLimitTokenApi::encrypt_with_rate_limit`] with key derivation on
    /// the blocking pool.
    ///
    /// # Errors
    /// Same as the synchronous variant.
    pub async fn encrypt_with_rate_limit_async(
        &self,
        data: String,
        secret: String,
    ) -> Result<String, IssuerError> {
        let issuer = self.clone();
        tokio::task::spawn_blocking(move || issuer.encrypt_with_rate_limit(&data, &secret))
            .await
            .map_err(|_| IssuerError::Cipher(CipherError::EncryptionFailed))?
    }

    /// [`RateLimitTokenApi::decrypt_with_rate_limit`] with key derivation on
    /// the blocking pool.
    ///
    /// # Errors
    /// Same as the synchronous variant.
    pub async fn decrypt_with_rate_limit_async(
        &self,
        encrypted: String,
        secret: String,
    ) -> Result<String, DecryptionError> {
        let issuer = self.clone();
        tokio::task::spawn_blocking(move || issuer.decrypt_with_rate_limit(&encrypted, &secret))
            .await
            .map_err(|_| DecryptionError::with_rate_limit(DecryptionError::payload()))?
    }

    fn reject(&self, failure: TokenFailure) -> TokenFailure {
        debug!(reason = failure.as_str(), "Rate limit token rejected");
        self.telemetry.record(SecurityEvent::TokenRejected {
            reason: failure.as_str(),
        });
        failure
    }

    fn handle_rate_limit_info(&self, raw: Value) {
        match self.policy {
            RateLimitInfoPolicy::Informational => {
                debug!(info = %raw, "Ignoring sender rate limit info");
                self.telemetry.record(SecurityEvent::RateLimitInfoIgnored);
            }
            RateLimitInfoPolicy::Apply => {
                let info: RateLimitInfo = match serde_json::from_value(raw) {
                    Ok(info) => info,
                    Err(err) => {
                        warn!(%err, "Malformed sender rate limit info");
                        self.telemetry.record(SecurityEvent::RateLimitInfoIgnored);
                        return;
                    }
                };
                match self
                    .limiter
                    .overwrite_state(info.tokens, info.bucket_size, info.refill_rate)
                {
                    Ok(()) => {
                        debug!(
                            tokens = info.tokens,
                            bucket_size = info.bucket_size,
                            refill_rate = info.refill_rate,
                            "Applied sender rate limit info"
                        );
                        self.telemetry.record(SecurityEvent::RateLimitInfoApplied);
                    }
                    Err(err) => {
                        warn!(%err, "Rejected sender rate limit info");
                        self.telemetry.record(SecurityEvent::RateLimitInfoIgnored);
                    }
                }
            }
        }
    }

    fn now(&self) -> u64 {
        self.authenticator.time_source().now_millis()
    }
}

impl std::fmt::Debug for RateLimitedTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitedTokenIssuer")
            .field("authenticator", &self.authenticator)
            .field("limiter", &self.limiter)
            .field("policy", &self.policy)
            .field("default_expiration_minutes", &self.default_expiration_minutes)
            .finish_non_exhaustive()
    }
}

impl RateLimitTokenApi for RateLimitedTokenIssuer {
    fn create_rate_limit_token(
        &self,
        payload: &Value,
        expiration_minutes: u64,
    ) -> Result<String, IssuerError> {
        if !self.authenticator.has_secret_key() {
            return Err(ConfigError::MissingSecretKey.into());
        }

        let claims = build_claims(payload.clone(), self.now(), expiration_minutes);
        let message = serde_json::to_string(&claims).map_err(|_| IssuerError::Serialization)?;
        let signed = self.authenticator.sign_message(&message)?;
        let token = serde_json::to_string(&signed).map_err(|_| IssuerError::Serialization)?;

        self.telemetry.record(SecurityEvent::TokenIssued);
        Ok(token)
    }

    fn validate_rate_limit_token(&self, token: &str) -> Result<bool, ConfigError> {
        Ok(self.check_token(token)?.is_ok())
    }

    fn encrypt_with_rate_limit(&self, data: &str, secret: &str) -> Result<String, IssuerError> {
        let encrypted_message = self.cipher.encrypt_payload(data, secret)?;
        let bucket = self.limiter.snapshot();

        let envelope = RateLimitEnvelope {
            encrypted_message,
            rate_limit_info: Some(RateLimitInfo {
                tokens: bucket.tokens,
                bucket_size: bucket.capacity,
                refill_rate: bucket.refill_rate,
                timestamp: self.now(),
            }),
        };
        serde_json::to_string(&envelope).map_err(|_| IssuerError::Serialization)
    }

    fn decrypt_with_rate_limit(
        &self,
        encrypted: &str,
        secret: &str,
    ) -> Result<String, DecryptionError> {
        let envelope: ReceivedEnvelope = serde_json::from_str(encrypted).map_err(|_| {
            debug!(reason = "malformed_envelope", "Rate limit envelope rejected");
            self.telemetry.record(SecurityEvent::DecryptionFailed {
                reason: "malformed_envelope",
            });
            DecryptionError::with_rate_limit(DecryptionError::payload())
        })?;

        let plaintext = self
            .cipher
            .decrypt_payload(&envelope.encrypted_message, secret)
            .map_err(DecryptionError::with_rate_limit)?;

        // Metadata is only considered once the payload has authenticated.
        if let Some(info) = envelope.rate_limit_info {
            self.handle_rate_limit_info(info);
        }
        Ok(plaintext)
    }
}
