//! # HMAC Signing
//!
//! ```text
//! payload   = JSON {"message": <text>, "timestamp": <now ms>}
//! signature = hex(HMAC-SHA256(secret, payload))
//! ```
//!
//! Verification order: parse payload, check the timestamp window, recompute
//! the digest, compare in constant time.

use serde_json::Value;
use shared_crypto::{constant_time_eq, hmac_sha256_hex, CryptoError, SharedSecret};
use shared_types::{SignedMessage, TimestampRejection, TimestampWindow, Timestamp};

/// Why a signed message was rejected.
///
/// Never surfaced to the sender; used for logs and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    /// `payload` is not a JSON object.
    MalformedPayload,
    /// The embedded timestamp is missing, non-numeric or outside the window.
    Timestamp(TimestampRejection),
    /// The digest does not match.
    SignatureMismatch,
}

impl VerificationFailure {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedPayload => "malformed_payload",
            Self::Timestamp(rejection) => rejection.as_str(),
            Self::SignatureMismatch => "signature_mismatch",
        }
    }
}

/// Signs `message` as of time `now`.
///
/// # Errors
///
/// Returns the MAC's key error; HMAC accepts any key length.
pub fn sign_payload(
    secret: &SharedSecret,
    message: &str,
    now: Timestamp,
) -> Result<SignedMessage, CryptoError> {
    // Keys serialize in sorted order: {"message":..,"timestamp":..}
    let payload = serde_json::json!({ "message": message, "timestamp": now }).to_string();
    let signature = hmac_sha256_hex(secret.as_bytes(), payload.as_bytes())?;

    Ok(SignedMessage {
        payload,
        signature,
        timestamp: now,
    })
}

/// Verifies a signed message at time `now`.
///
/// Only the timestamp inside the signed payload is trusted; the outer
/// `timestamp` field is informational.
pub fn verify_signed_message(
    secret: &SharedSecret,
    window: &TimestampWindow,
    now: Timestamp,
    signed: &SignedMessage,
) -> Result<(), VerificationFailure> {
    let payload: Value = serde_json::from_str(&signed.payload)
        .map_err(|_| VerificationFailure::MalformedPayload)?;
    let fields = payload
        .as_object()
        .ok_or(VerificationFailure::MalformedPayload)?;

    let timestamp = fields
        .get("timestamp")
        .and_then(Value::as_f64)
        .ok_or(VerificationFailure::Timestamp(TimestampRejection::NotFinite))?;
    window
        .check(timestamp, now)
        .map_err(VerificationFailure::Timestamp)?;

    let expected = hmac_sha256_hex(secret.as_bytes(), signed.payload.as_bytes())
        .map_err(|_| VerificationFailure::SignatureMismatch)?;

    if constant_time_eq(expected.as_bytes(), signed.signature.as_bytes()) {
        Ok(())
    } else {
        Err(VerificationFailure::SignatureMismatch)
    }
}
