//! # Secret Vault Subsystem (RG-04)
//!
//! Opaque at-rest encryption for durable secrets such as access tokens.
//! Same primitives as the payload cipher, but the output is a single hex
//! string instead of a structured envelope:
//!
//! ```text
//! hex( salt(16) ‖ iv(12) ‖ authTag(16) ‖ ciphertext(N) )
//! ```
//!
//! Every decryption failure reports the same message, so the vault cannot be
//! used as a password or padding oracle.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::envelope::{SecretEnvelope, VaultFailure, MIN_ENVELOPE_LEN};
pub use domain::errors::VaultError;
pub use ports::inbound::SecretVaultApi;
pub use service::SecretVault;
