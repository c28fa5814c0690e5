use anyhow::Context;
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_semantic_conventions::resource;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use super::TracingConfig;

// The OTLP exporters log through these crates; bridging them back into the
// log exporter would feed it its own output.
const EXPORTER_NOISE: [&str; 5] = ["h2=off", "hyper=off", "tonic=off", "tower=off", "opentelemetry=off"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the OpenTelemetry providers alive; call [`TelemetryGuard::shutdown`]
/// on exit to flush pending spans, logs and metrics.
#[derive(Default)]
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
    logger_provider: Option<SdkLoggerProvider>,
    meter_provider: Option<SdkMeterProvider>,
}

impl TelemetryGuard {
    pub fn is_exporting(&self) -> bool {
        self.tracer_provider.is_some()
    }

    pub fn shutdown(self) {
        if let Some(provider) = self.tracer_provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Failed to shut down tracer provider");
            }
        }
        if let Some(provider) = self.meter_provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Failed to shut down meter provider");
            }
        }
        if let Some(provider) = self.logger_provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Failed to shut down logger provider");
            }
        }
    }
}

/// Initialize structured logging, plus OTLP export of traces, logs and
/// metrics when an endpoint is configured.
pub fn init_tracing(config: &TracingConfig, port: u16) -> anyhow::Result<TelemetryGuard> {
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(config)?];
    let mut guard = TelemetryGuard::default();

    if let Some(endpoint) = config.otlp_endpoint.as_deref() {
        let resource = build_resource(config);

        let span_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
            .context("failed to create OTLP span exporter")?;
        let tracer_provider = SdkTracerProvider::builder()
            .with_batch_exporter(span_exporter)
            .with_resource(resource.clone())
            .build();
        layers.push(
            tracing_opentelemetry::layer()
                .with_tracer(tracer_provider.tracer(env!("CARGO_PKG_NAME")))
                .with_location(true)
                .with_error_events_to_status(true)
                .with_filter(env_filter(config)?)
                .boxed(),
        );
        opentelemetry::global::set_tracer_provider(tracer_provider.clone());

        let log_exporter = opentelemetry_otlp::LogExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
            .context("failed to create OTLP log exporter")?;
        let logger_provider = SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource.clone())
            .build();
        let mut log_filter = env_filter(config)?;
        for directive in EXPORTER_NOISE {
            log_filter = log_filter.add_directive(
                directive
                    .parse()
                    .with_context(|| format!("failed to parse filter: {directive}"))?,
            );
        }
        layers.push(
            OpenTelemetryTracingBridge::new(&logger_provider)
                .with_filter(log_filter)
                .boxed(),
        );

        let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
            .context("failed to create OTLP metric exporter")?;
        let meter_provider = SdkMeterProvider::builder()
            .with_periodic_exporter(metric_exporter)
            .with_resource(resource)
            .build();
        opentelemetry::global::set_meter_provider(meter_provider.clone());

        guard = TelemetryGuard {
            tracer_provider: Some(tracer_provider),
            logger_provider: Some(logger_provider),
            meter_provider: Some(meter_provider),
        };
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(
        port = port,
        environment = %config.environment,
        json_format = config.json_format,
        otlp_endpoint = config.otlp_endpoint.as_deref().unwrap_or("disabled"),
        "Server initialized"
    );

    Ok(guard)
}

fn env_filter(config: &TracingConfig) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level: {}", config.log_level)),
    }
}

fn fmt_layer(config: &TracingConfig) -> anyhow::Result<BoxedLayer> {
    let filter = env_filter(config)?;
    let layer = if config.json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(filter)
            .boxed()
    };
    Ok(layer)
}

fn build_resource(config: &TracingConfig) -> Resource {
    Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attribute(KeyValue::new(
            resource::SERVICE_VERSION,
            env!("CARGO_PKG_VERSION"),
        ))
        .with_attribute(KeyValue::new(
            "deployment.environment.name",
            config.environment.clone(),
        ))
        .build()
}
