//! # Domain Layer
//!
//! The flat envelope codec and vault errors.

pub mod envelope;
pub mod errors;
