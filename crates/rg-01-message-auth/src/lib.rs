//! # Message Authentication Subsystem (RG-01)
//!
//! Signs string messages with HMAC-SHA256 and verifies them with replay-window
//! enforcement.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): pure signing/verification, no clock or I/O
//! - **Ports Layer** (`ports/`): the `MessageAuthenticationApi` driving port
//! - **Service Layer** (`service.rs`): `MessageAuthenticator`, wiring the
//!   domain to the clock and telemetry ports
//!
//! ## Security Notes
//!
//! - **Constant-time comparison** of the expected and provided digest
//! - **Replay window**: `now - expiration <= timestamp <= now + 60s`
//! - **Boolean verification**: untrusted input that fails verification is
//!   ordinary data, so `verify_message` returns `false` instead of erroring
//! - **One secret per trust boundary**: `set_secret_key` takes `&mut self`,
//!   so a shared (`Arc`) authenticator cannot be re-keyed while in use

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::signing::{sign_payload, verify_signed_message, VerificationFailure};
pub use ports::inbound::MessageAuthenticationApi;
pub use service::MessageAuthenticator;
