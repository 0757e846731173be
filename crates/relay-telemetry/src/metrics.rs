//! Security event sinks.
//!
//! Metric naming follows `rg_<area>_<metric>_<unit>`. Each sink owns its
//! registry, so several can coexist in one process (and in tests).

use crate::{TelemetryConfig, TelemetryError};
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use shared_types::{SecurityEvent, SecurityTelemetry};
use tracing::{debug, info};

/// Counter of security events, labelled by `event` and `reason`.
pub const SECURITY_EVENTS_METRIC: &str = "rg_security_events_total";

/// Prometheus-backed [`SecurityTelemetry`] sink.
pub struct PrometheusTelemetry {
    registry: Registry,
    events: IntCounterVec,
}

impl PrometheusTelemetry {
    /// Sink with a fresh registry, labelled with `config.service_name`.
    ///
    /// # Errors
    /// - `TelemetryError::MetricsInit` if the counter cannot be created
    pub fn new(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let registry = Registry::new();
        let events = IntCounterVec::new(
            Opts::new(SECURITY_EVENTS_METRIC, "Security events by name and reason")
                .const_label("service", config.service_name.clone()),
            &["event", "reason"],
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        registry
            .register(Box::new(events.clone()))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        Ok(Self { registry, events })
    }

    /// The registry, for mounting on an HTTP exporter.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// How many times `event` (with its reason) has been recorded.
    pub fn count(&self, event: SecurityEvent) -> u64 {
        self.events
            .with_label_values(&[event.name(), event.reason().unwrap_or("")])
            .get()
    }

    /// Encode all metrics as Prometheus text format.
    ///
    /// # Errors
    /// - `TelemetryError::MetricsInit` if encoding fails
    pub fn encode(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
    }
}

impl SecurityTelemetry for PrometheusTelemetry {
    fn record(&self, event: SecurityEvent) {
        self.events
            .with_label_values(&[event.name(), event.reason().unwrap_or("")])
            .inc();
    }
}

impl std::fmt::Debug for PrometheusTelemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusTelemetry").finish_non_exhaustive()
    }
}

/// Sink that writes every event as a log line.
///
/// Failures log at `info`, routine events at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl SecurityTelemetry for TracingTelemetry {
    fn record(&self, event: SecurityEvent) {
        match event.reason() {
            Some(reason) => info!(event = event.name(), reason, "Security event"),
            None => debug!(event = event.name(), "Security event"),
        }
    }
}
