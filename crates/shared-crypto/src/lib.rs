//! # Shared Crypto - Relay-Guard Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | HMAC-SHA256 | Message authentication, constant-time compare |
//! | `kdf` | PBKDF2-HMAC-SHA256 | Password-derived keys |
//! | `symmetric` | AES-256-GCM | Payload and at-rest encryption |
//! | `secret` | - | Zeroize-on-drop secret storage |
//!
//! ## Security Properties
//!
//! - **Constant-time**: digest comparison never short-circuits on content
//! - **Zeroization**: secrets and derived keys are wiped on drop
//! - **Versioned parameters**: every envelope records its [`CipherSuite`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod kdf;
pub mod secret;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{constant_time_eq, hmac_sha256, hmac_sha256_hex};
pub use kdf::derive_key;
pub use secret::SharedSecret;
pub use symmetric::{open, seal, CipherSuite, Sealed, IV_SIZE, SALT_SIZE, TAG_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod proptests;
