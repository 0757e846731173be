//! # Payload Cipher Subsystem (RG-02)
//!
//! Authenticated symmetric encryption of string payloads under
//! password-derived keys.
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | Cipher | AES-256-GCM |
//! | KDF | PBKDF2-HMAC-SHA256, 100 000 iterations |
//! | Salt / IV / Tag | 16 / 12 / 16 bytes |
//!
//! ## Security Notes
//!
//! - **Single failure type**: every decryption problem (malformed envelope,
//!   wrong secret, tampering, expiry) is the same `DecryptionError`
//! - **Expiry**: encrypted messages share the authenticator's replay window;
//!   a window of 0 disables the age check
//! - **Cost**: key derivation is a fixed CPU cost per call; the `*_async`
//!   variants run it on the blocking pool

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::envelope::{decode_envelope, encode_envelope, EnvelopeFailure};
pub use domain::errors::CipherError;
pub use ports::inbound::PayloadCipherApi;
pub use service::PayloadCipher;
