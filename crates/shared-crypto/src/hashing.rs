//! # Message Authentication
//!
//! HMAC-SHA256 and constant-time comparison.

use crate::CryptoError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 output size in bytes.
pub const HMAC_SIZE: usize = 32;

/// Computes HMAC-SHA256 of `data` under `key`.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyLength` if the MAC rejects the key; HMAC
/// accepts keys of any size, so this does not happen in practice.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; HMAC_SIZE], CryptoError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
        expected: HMAC_SIZE,
        actual: key.len(),
    })?;
    mac.update(data);

    let mut out = [0u8; HMAC_SIZE];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// HMAC-SHA256 as 64 lowercase hex characters.
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> Result<String, CryptoError> {
    hmac_sha256(key, data).map(hex::encode)
}

/// Compares two byte strings in time independent of where they differ.
///
/// Inputs of different lengths return `false` immediately. That leaks only
/// the length, which for hex digests is public anyway.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
