use anyhow::{Context, Error, Result};
use once_cell::sync::OnceCell;
use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracer, SdkTracerProvider},
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "regional-curator";

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Install the global tracing subscriber once.
///
/// Logs are JSON formatted and filtered by `RUST_LOG` (default `info`). When
/// `OTEL_EXPORTER_OTLP_ENDPOINT` is set, spans are also exported over OTLP;
/// if the exporter cannot be built, logging continues without it.
///
/// # Errors
/// Returns an error if another global subscriber is already installed.
pub fn init() -> Result<()> {
    TRACING_INIT.get_or_try_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false).json();

        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();
        let (otel_layer, otel_error) = match endpoint.as_deref().map(init_tracer) {
            Some(Ok(tracer)) => (Some(tracing_opentelemetry::layer().with_tracer(tracer)), None),
            Some(Err(error)) => (None, Some(error)),
            None => (None, None),
        };
        let otel_enabled = otel_layer.is_some();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .try_init()
            .map_err(|e| Error::msg(e.to_string()))?;

        if let Some(error) = otel_error {
            warn!(error = %error, "OTLP exporter unavailable, tracing without OpenTelemetry");
        }
        info!(otel_enabled, endpoint = ?endpoint, "tracing initialized");
        Ok::<(), Error>(())
    })?;
    Ok(())
}

/// OTLP tracer sampled by `OTEL_SAMPLING_RATIO` (default 1.0).
fn init_tracer(endpoint: &str) -> Result<SdkTracer> {
    let sampling_ratio = std::env::var("OTEL_SAMPLING_RATIO")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(1.0);

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("failed to build OTLP span exporter")?;

    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", SERVICE_NAME),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_sampler(Sampler::TraceIdRatioBased(sampling_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource)
        .build();

    let tracer = provider.tracer(SERVICE_NAME);
    global::set_tracer_provider(provider);
    Ok(tracer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_without_otlp_is_idempotent() {
        temp_env::with_vars(
            [
                ("OTEL_EXPORTER_OTLP_ENDPOINT", None),
                ("RUST_LOG", Some("warn")),
            ],
            || {
                init().expect("first init installs the subscriber");
                init().expect("second init is a no-op");
                assert!(TRACING_INIT.get().is_some());
            },
        );
    }
}
