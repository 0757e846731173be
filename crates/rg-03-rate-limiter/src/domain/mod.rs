//! # Domain Layer
//!
//! The bucket state machine. Time is passed in by the caller.

pub mod bucket;
