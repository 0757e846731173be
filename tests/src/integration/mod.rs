//! # Integration Tests
//!
//! Flows that cross component boundaries: a sender and a receiver sharing a
//! secret, components wired from one configuration, and telemetry observing
//! the whole exchange.

pub mod flows;
