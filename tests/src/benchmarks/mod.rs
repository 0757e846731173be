//! # Relay-Guard Benchmarks
//!
//! Criterion benchmarks per component, registered from
//! `benches/security_benchmarks.rs`.

pub mod rg_01_message_auth;
