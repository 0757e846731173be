//! # Token Claims

use serde_json::Value;
use shared_types::{SignedMessage, SignedPayload, Timestamp, TokenClaims};

const MS_PER_MINUTE: u64 = 60_000;

/// Why a token was rejected.
///
/// Never surfaced to callers; used for logs and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFailure {
    /// Not a signed message, or the inner claims do not parse.
    Malformed,
    /// Signature or signing window check failed.
    Signature,
    /// The embedded expiration has passed.
    Expired,
}

impl TokenFailure {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed_token",
            Self::Signature => "invalid_signature",
            Self::Expired => "token_expired",
        }
    }
}

/// Claims for `payload` expiring `expiration_minutes` after `now`.
pub fn build_claims(payload: Value, now: Timestamp, expiration_minutes: u64) -> TokenClaims {
    TokenClaims {
        payload,
        expiration: now.saturating_add(expiration_minutes.saturating_mul(MS_PER_MINUTE)),
    }
}

/// Extract the claims from an already verified signed message.
pub fn decode_claims(signed: &SignedMessage) -> Result<TokenClaims, TokenFailure> {
    let inner: SignedPayload =
        serde_json::from_str(&signed.payload).map_err(|_| TokenFailure::Malformed)?;
    serde_json::from_str(&inner.message).map_err(|_| TokenFailure::Malformed)
}

/// Whether `claims` are still valid at `now`. The expiration instant itself
/// is still valid.
pub fn is_unexpired(claims: &TokenClaims, now: Timestamp) -> bool {
    now <= claims.expiration
}
