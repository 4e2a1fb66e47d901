//! Prometheus metrics for selection requests.

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

#[derive(Debug, Clone)]
pub struct SelectionMetrics {
    pub requests: IntCounterVec,
    pub fetch_failures: IntCounterVec,
    pub selection_size: HistogramVec,
}

impl SelectionMetrics {
    /// Create the collectors and register them on `registry`.
    ///
    /// # Errors
    /// Fails when a collector with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests = IntCounterVec::new(
            Opts::new(
                "regional_selection_requests_total",
                "Selection requests by operation",
            ),
            &["operation"],
        )?;
        let fetch_failures = IntCounterVec::new(
            Opts::new(
                "regional_fetch_failures_total",
                "Article store fetches degraded to an empty candidate set",
            ),
            &["operation"],
        )?;
        let selection_size = HistogramVec::new(
            HistogramOpts::new(
                "regional_selection_size",
                "Number of articles returned per selection",
            )
            .buckets(vec![0.0, 1.0, 3.0, 5.0, 10.0, 20.0, 50.0]),
            &["operation"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(fetch_failures.clone()))?;
        registry.register(Box::new(selection_size.clone()))?;

        Ok(Self {
            requests,
            fetch_failures,
            selection_size,
        })
    }

    pub fn record_request(&self, operation: &str) {
        self.requests.with_label_values(&[operation]).inc();
    }

    pub fn record_fetch_failure(&self, operation: &str) {
        self.fetch_failures.with_label_values(&[operation]).inc();
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn record_selection_size(&self, operation: &str, size: usize) {
        self.selection_size
            .with_label_values(&[operation])
            .observe(size as f64);
    }
}
