//! # Domain Layer
//!
//! Token claim construction and decoding; no clock, no I/O.

pub mod claims;
pub mod errors;
