//! # Token Issuer Subsystem (RG-05)
//!
//! Composes the message authenticator, the token bucket limiter and the
//! payload cipher.
//!
//! ## Rate-Limit Tokens
//!
//! A token is the JSON form of a `SignedMessage` whose inner message is
//! `{"payload": <any>, "expiration": <ms>}`. Validation applies two
//! independent expiry checks:
//!
//! 1. the authenticator's signing window on the signature timestamp
//! 2. the embedded `expiration`
//!
//! ## Rate-Limit Envelopes
//!
//! `encrypt_with_rate_limit` bundles an encrypted payload with a snapshot of
//! the local bucket. The snapshot is not authenticated, so by default a
//! receiver only logs it. [`RateLimitInfoPolicy::Apply`] restores the older
//! behaviour of overwriting the local limiter, with validation.
//!
//! [`RateLimitInfoPolicy::Apply`]: shared_types::RateLimitInfoPolicy::Apply

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::claims::{build_claims, decode_claims, is_unexpired, TokenFailure};
pub use domain::errors::IssuerError;
pub use ports::inbound::RateLimitTokenApi;
pub use service::RateLimitedTokenIssuer;
