//! # Key Derivation
//!
//! PBKDF2-HMAC-SHA256 for turning passwords into AES-256 keys.
//!
//! The iteration count is a fixed, deliberate CPU cost (100 000 rounds for
//! suite V1). Latency-sensitive hosts should run derivation off their main
//! task.

use sha2::Sha256;
use zeroize::Zeroizing;

/// Derived key size in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// Derives a 256-bit key from `password` and `salt`.
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, key.as_mut());
    key
}
