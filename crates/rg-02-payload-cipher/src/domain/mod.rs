//! # Domain Layer
//!
//! Envelope encoding and decoding; no clock, no I/O.

pub mod envelope;
pub mod errors;
