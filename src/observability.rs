pub mod metrics;
pub mod tracing;

use std::sync::Arc;

use anyhow::Result;
use prometheus::{Encoder, Registry, TextEncoder};

use self::metrics::SelectionMetrics;

/// Tracing plus a private Prometheus registry holding the selection metrics.
#[derive(Debug, Clone)]
pub struct Telemetry {
    registry: Arc<Registry>,
    metrics: Arc<SelectionMetrics>,
}

impl Telemetry {
    /// Initialize tracing and register the selection metrics.
    ///
    /// # Errors
    /// Fails if the tracing subscriber cannot be installed or a metric cannot
    /// be registered.
    pub fn new() -> Result<Self> {
        tracing::init()?;
        Self::without_tracing()
    }

    /// Metrics only, for embedders that install their own subscriber.
    ///
    /// # Errors
    /// Fails if a metric cannot be registered.
    pub fn without_tracing() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        let metrics = Arc::new(SelectionMetrics::new(&registry)?);
        Ok(Self { registry, metrics })
    }

    #[must_use]
    pub fn metrics(&self) -> Arc<SelectionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Registry contents in the Prometheus text exposition format.
    #[must_use]
    pub fn render_prometheus(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer).ok();
        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_registered_metrics() {
        let telemetry = Telemetry::without_tracing().expect("telemetry");
        telemetry.metrics().record_request("latest");
        let rendered = telemetry.render_prometheus();
        assert!(rendered.contains("regional_selection_requests_total"));
        assert!(rendered.contains("operation=\"latest\""));
    }
}
