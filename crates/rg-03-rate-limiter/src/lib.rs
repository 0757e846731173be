//! # Rate Limiter Subsystem (RG-03)
//!
//! Token bucket rate limiter with lazy, continuous refill.
//!
//! ## Algorithm
//!
//! - The bucket holds `tokens ∈ [0, capacity]` (fractional)
//! - Every read or write first credits `elapsed_seconds * refill_rate`,
//!   capped at `capacity`; there is no background timer
//! - `consume(n)` admits the request and subtracts `n` if enough tokens are
//!   available, otherwise leaves the bucket untouched
//!
//! ## Concurrency
//!
//! The bucket sits behind a mutex so refill, check and subtract happen as
//! one step; concurrent callers sharing an `Arc<TokenBucketLimiter>` cannot
//! double-spend.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::bucket::TokenBucketState;
pub use ports::inbound::RateLimiterApi;
pub use service::TokenBucketLimiter;
