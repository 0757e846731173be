//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that external callers use

pub mod inbound;
