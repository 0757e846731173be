//! # Shared Types Crate
//!
//! Everything that crosses a component boundary in Relay-Guard:
//!
//! - **Envelopes** (`envelope`): `SignedMessage`, `EncryptedMessage`,
//!   `RateLimitEnvelope` and their inner JSON documents.
//! - **Errors** (`errors`): the configuration / validation / decryption taxonomy.
//! - **Ports** (`time`, `telemetry`): the clock and the optional event sink.
//! - **Configuration** (`config`): serde-backed settings with validation.
//!
//! ## Design Principles
//!
//! - **Pure library**: no network or disk I/O.
//! - **Injected collaborators**: no global instances; every component receives
//!   its clock and telemetry sink explicitly.

pub mod config;
pub mod envelope;
pub mod errors;
pub mod security;
pub mod telemetry;
pub mod time;

pub use config::{
    AuthConfig, CipherConfig, RateLimitConfig, RateLimitInfoPolicy, SecurityConfig, TokenConfig,
};
pub use envelope::{
    EncryptedMessage, RateLimitEnvelope, RateLimitInfo, SignedMessage, SignedPayload, TokenClaims,
};
pub use errors::{ConfigError, DecryptionError, ValidationError};
pub use security::{TimestampRejection, TimestampWindow};
pub use telemetry::{NoopTelemetry, SecurityEvent, SecurityTelemetry};
pub use time::{MockTimeSource, SystemTimeSource, TimeSource, Timestamp};
