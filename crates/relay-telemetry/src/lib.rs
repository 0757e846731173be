//! # Relay Telemetry
//!
//! Observability for Relay-Guard hosts.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an env filter and either
//!   human-readable or JSON output
//! - **Metrics**: [`PrometheusTelemetry`], a `SecurityTelemetry` sink that
//!   counts security events by name and reason
//! - **Tracing sink**: [`TracingTelemetry`], which turns events into log lines
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_telemetry::{init_logging, PrometheusTelemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//!
//! let metrics = Arc::new(PrometheusTelemetry::new(&config)?);
//! let auth = MessageAuthenticator::with_secret_key(key)?.with_telemetry(metrics.clone());
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RG_SERVICE_NAME` | `relay-guard` | Service label on logs and metrics |
//! | `RG_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directive |
//! | `RG_JSON_LOGS` | `false` | JSON log lines |
//! | `RG_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{PrometheusTelemetry, TracingTelemetry, SECURITY_EVENTS_METRIC};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive did not parse.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric creation, registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}
