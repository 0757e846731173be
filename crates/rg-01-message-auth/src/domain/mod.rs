//! # Domain Layer
//!
//! Pure signing logic with no I/O dependencies. Callers pass the current
//! time in.

pub mod signing;
