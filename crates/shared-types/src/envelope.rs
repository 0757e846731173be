//! # Wire Envelopes
//!
//! Value objects produced and consumed once per logical exchange. Field names
//! and order are part of the wire format and match the JSON produced by the
//! relay's browser side.
//!
//! ```text
//! SignedMessage     {"payload":"<json>","signature":"<64 hex>","timestamp":<ms>}
//! EncryptedMessage  {"encryptedPayload":"<b64>","iv":"<b64>","authTag":"<b64>",
//!                    "salt":"<b64>","timestamp":<ms>,"version":1}
//! RateLimitEnvelope {"encryptedMessage":{..},"rateLimitInfo":{..}}
//! ```

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope version written when a payload carries no explicit tag.
pub const LEGACY_ENVELOPE_VERSION: u8 = 1;

fn legacy_version() -> u8 {
    LEGACY_ENVELOPE_VERSION
}

/// An HMAC-signed message.
///
/// `signature` is the lowercase hex HMAC-SHA256 of the exact `payload` string,
/// so it is always 64 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    /// JSON-encoded [`SignedPayload`].
    pub payload: String,
    /// Hex-encoded HMAC-SHA256 over `payload`.
    pub signature: String,
    /// Signing time, duplicated outside the payload for convenience.
    pub timestamp: Timestamp,
}

/// The JSON document carried in [`SignedMessage::payload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPayload {
    /// The signed message text.
    pub message: String,
    /// Signing time.
    pub timestamp: Timestamp,
}

/// Claims embedded in a rate-limit token's signed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Arbitrary caller payload.
    pub payload: Value,
    /// Absolute expiry in ms epoch.
    pub expiration: Timestamp,
}

/// An AES-256-GCM encrypted payload with its key-derivation salt.
///
/// Decoded `iv`, `authTag` and `salt` are exactly 12, 16 and 16 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedMessage {
    /// Base64 ciphertext (without the tag).
    pub encrypted_payload: String,
    /// Base64 12-byte nonce.
    pub iv: String,
    /// Base64 16-byte GCM tag.
    pub auth_tag: String,
    /// Base64 16-byte PBKDF2 salt.
    pub salt: String,
    /// Encryption time.
    pub timestamp: Timestamp,
    /// Cipher suite version. Absent on envelopes written before versioning.
    #[serde(default = "legacy_version")]
    pub version: u8,
}

/// Limiter state attached to an encrypted envelope.
///
/// This metadata is unauthenticated; receivers treat it as informational.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    /// Tokens available on the sending side.
    pub tokens: f64,
    /// Sender's bucket capacity.
    pub bucket_size: f64,
    /// Sender's refill rate in tokens per second.
    pub refill_rate: f64,
    /// When the snapshot was taken.
    pub timestamp: Timestamp,
}

/// Encrypted message bundled with the sender's limiter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitEnvelope {
    /// The encrypted payload.
    pub encrypted_message: EncryptedMessage,
    /// Optional sender limiter snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_info: Option<RateLimitInfo>,
}
