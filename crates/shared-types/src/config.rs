//! Security configuration with validation.
//!
//! Secrets are never part of this configuration; they are handed to each
//! component explicitly.

use crate::errors::ConfigError;
use crate::security::{DEFAULT_EXPIRATION_MS, MAX_FUTURE_SKEW_MS};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Top-level configuration for all components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Message authenticator settings
    pub auth: AuthConfig,
    /// Payload cipher settings
    pub cipher: CipherConfig,
    /// Token bucket settings
    pub rate_limit: RateLimitConfig,
    /// Token issuer settings
    pub token: TokenConfig,
}

impl SecurityConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RG_AUTH_EXPIRATION_MS`: Signed message window (default: 300000)
    /// - `RG_CIPHER_EXPIRATION_MS`: Encrypted message window, 0 = never (default: 300000)
    /// - `RG_RATE_LIMIT_CAPACITY`: Bucket capacity (default: 10)
    /// - `RG_RATE_LIMIT_REFILL_RATE`: Tokens per second (default: 1)
    /// - `RG_TOKEN_EXPIRATION_MINUTES`: Token lifetime (default: 5)
    /// - `RG_RATE_LIMIT_INFO_POLICY`: `informational` or `apply` (default: informational)
    ///
    /// Unparseable values fall back to the default; call [`Self::validate`]
    /// before use.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            auth: AuthConfig {
                expiration_ms: env_parse("RG_AUTH_EXPIRATION_MS")
                    .unwrap_or(defaults.auth.expiration_ms),
                future_skew_ms: defaults.auth.future_skew_ms,
            },
            cipher: CipherConfig {
                expiration_ms: env_parse("RG_CIPHER_EXPIRATION_MS")
                    .unwrap_or(defaults.cipher.expiration_ms),
            },
            rate_limit: RateLimitConfig {
                capacity: env_parse("RG_RATE_LIMIT_CAPACITY")
                    .unwrap_or(defaults.rate_limit.capacity),
                refill_rate: env_parse("RG_RATE_LIMIT_REFILL_RATE")
                    .unwrap_or(defaults.rate_limit.refill_rate),
            },
            token: TokenConfig {
                default_expiration_minutes: env_parse("RG_TOKEN_EXPIRATION_MINUTES")
                    .unwrap_or(defaults.token.default_expiration_minutes),
                rate_limit_info: env::var("RG_RATE_LIMIT_INFO_POLICY")
                    .ok()
                    .and_then(|v| RateLimitInfoPolicy::parse(&v))
                    .unwrap_or(defaults.token.rate_limit_info),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.expiration_ms <= 0 {
            return Err(ConfigError::InvalidExpiration {
                value_ms: self.auth.expiration_ms,
            });
        }

        if self.cipher.expiration_ms < 0 {
            return Err(ConfigError::InvalidExpiration {
                value_ms: self.cipher.expiration_ms,
            });
        }

        if !(self.rate_limit.capacity > 0.0 && self.rate_limit.capacity.is_finite())
            || !(self.rate_limit.refill_rate > 0.0 && self.rate_limit.refill_rate.is_finite())
        {
            return Err(ConfigError::InvalidRateLimit {
                capacity: self.rate_limit.capacity,
                refill_rate: self.rate_limit.refill_rate,
            });
        }

        if self.token.default_expiration_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "token.default_expiration_minutes",
                reason: "cannot be 0".into(),
            });
        }

        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(variable = name, value = %raw, "Ignoring unparseable environment variable");
    }
    parsed
}

/// Message authenticator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Replay window in milliseconds; must be positive.
    pub expiration_ms: i64,
    /// Tolerated clock skew for future timestamps.
    pub future_skew_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            expiration_ms: DEFAULT_EXPIRATION_MS as i64,
            future_skew_ms: MAX_FUTURE_SKEW_MS,
        }
    }
}

/// Payload cipher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    /// Replay window in milliseconds; 0 means encrypted messages never expire.
    pub expiration_ms: i64,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            expiration_ms: DEFAULT_EXPIRATION_MS as i64,
        }
    }
}

/// Token bucket configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum burst size
    pub capacity: f64,
    /// Tokens added per second
    pub refill_rate: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: 10.0,
            refill_rate: 1.0,
        }
    }
}

/// Token issuer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Lifetime of issued tokens
    pub default_expiration_minutes: u64,
    /// What to do with rate-limit metadata found in encrypted envelopes
    pub rate_limit_info: RateLimitInfoPolicy,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            default_expiration_minutes: 5,
            rate_limit_info: RateLimitInfoPolicy::default(),
        }
    }
}

/// Handling of unauthenticated limiter metadata in received envelopes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitInfoPolicy {
    /// Log and report the metadata, never change local state.
    #[default]
    Informational,
    /// Overwrite the local limiter with the (validated) metadata.
    Apply,
}

impl RateLimitInfoPolicy {
    /// Parses `informational` or `apply`, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "informational" => Some(Self::Informational),
            "apply" => Some(Self::Apply),
            _ => None,
        }
    }
}
