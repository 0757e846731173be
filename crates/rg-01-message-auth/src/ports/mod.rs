//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that external callers use
//!
//! Outbound dependencies (clock, telemetry) are the shared ports in
//! `shared_types::time` and `shared_types::telemetry`.

pub mod inbound;
