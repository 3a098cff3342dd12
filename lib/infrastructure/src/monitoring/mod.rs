pub mod meter;

use std::time::Duration;

use anyhow::Context as _;
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

//KNOWN ISSUES:
// - OpenTelemetry log appender doesn't contain trace-id and attributes from the span

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MonitoringConfig {
    pub service_name: String,
    pub app_name: String,
    #[serde(default)]
    pub log_format: LogFormat,
    pub logs: EnvFilterConfig,
    pub traces: EnvFilterConfig,
    pub otlp: Option<OtlpConfig>,
}

/// Format of the log lines written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EnvFilterConfig {
    pub default_level: String,
    #[serde(default)]
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct OtlpConfig {
    /// Collector endpoint. Without one, every signal goes to stdout.
    pub url: Option<String>,
    #[serde(default = "default_metrics_interval_secs")]
    pub metrics_interval_secs: u64,
}

fn default_metrics_interval_secs() -> u64 {
    15
}

impl MonitoringConfig {
    pub fn init(&self) -> anyhow::Result<()> {
        opentelemetry::global::set_text_map_propagator(TraceContextPropagator::default());

        match &self.otlp {
            Some(otlp) => self.init_with_otlp(otlp),
            None => tracing_subscriber::registry()
                .with(self.log_format.layer(std::io::stdout).with_filter(self.logs.to_env_filter()?))
                .try_init()
                .context("Error installing tracing subscriber"),
        }
    }

    fn init_with_otlp(&self, otlp: &OtlpConfig) -> anyhow::Result<()> {
        let resource = self.resource();

        let logger_provider = otlp.logger_provider(resource.clone())?;
        let logging_layer =
            OpenTelemetryTracingBridge::new(&logger_provider).with_filter(self.logs.to_env_filter()?);

        let tracer = otlp.tracer_provider(resource.clone())?.tracer(self.app_name.clone());
        let tracing_layer = OpenTelemetryLayer::new(tracer).with_filter(self.traces.to_env_filter()?);

        opentelemetry::global::set_meter_provider(otlp.meter_provider(resource)?);

        tracing_subscriber::registry()
            .with(tracing_layer)
            .with(logging_layer)
            .with(self.log_format.layer(std::io::stdout).with_filter(self.logs.to_env_filter()?))
            .try_init()
            .context("Error installing tracing subscriber")
    }

    fn resource(&self) -> Resource {
        Resource::builder()
            .with_attribute(KeyValue::new("service.name", self.service_name.clone()))
            .with_attribute(KeyValue::new("app.name", self.app_name.clone()))
            .build()
    }
}

impl LogFormat {
    fn layer<S, W>(self, writer: W) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer().with_writer(writer);

        match self {
            LogFormat::Plain => layer.boxed(),
            LogFormat::Json => layer.json().boxed(),
        }
    }
}

impl EnvFilterConfig {
    fn to_env_filter(&self) -> anyhow::Result<EnvFilter> {
        let default_directive = self
            .default_level
            .parse::<Directive>()
            .with_context(|| format!("Invalid log level {}", self.default_level))?;

        EnvFilter::builder()
            .with_default_directive(default_directive)
            .parse(self.filters.join(","))
            .with_context(|| format!("Invalid log filters {:?}", self.filters))
    }
}

impl OtlpConfig {
    fn tracer_provider(&self, resource: Resource) -> anyhow::Result<SdkTracerProvider> {
        let builder = SdkTracerProvider::builder().with_resource(resource);

        let builder = match &self.url {
            Some(url) => {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_tonic()
                    .with_endpoint(url.clone())
                    .build()
                    .context("Error building OTLP span exporter")?;
                builder.with_batch_exporter(exporter)
            }
            None => builder.with_simple_exporter(opentelemetry_stdout::SpanExporter::default()),
        };

        Ok(builder.build())
    }

    fn meter_provider(&self, resource: Resource) -> anyhow::Result<SdkMeterProvider> {
        let interval = Duration::from_secs(self.metrics_interval_secs);
        let builder = SdkMeterProvider::builder().with_resource(resource);

        let builder = match &self.url {
            Some(url) => {
                let exporter = opentelemetry_otlp::MetricExporter::builder()
                    .with_tonic()
                    .with_endpoint(url.clone())
                    .build()
                    .context("Error building OTLP metric exporter")?;
                builder.with_reader(PeriodicReader::builder(exporter).with_interval(interval).build())
            }
            None => builder.with_reader(
                PeriodicReader::builder(opentelemetry_stdout::MetricExporter::default())
                    .with_interval(interval)
                    .build(),
            ),
        };

        Ok(builder.build())
    }

    fn logger_provider(&self, resource: Resource) -> anyhow::Result<SdkLoggerProvider> {
        let builder = SdkLoggerProvider::builder().with_resource(resource);

        let builder = match &self.url {
            Some(url) => {
                let exporter = opentelemetry_otlp::LogExporter::builder()
                    .with_tonic()
                    .with_endpoint(url.clone())
                    .build()
                    .context("Error building OTLP log exporter")?;
                builder.with_batch_exporter(exporter)
            }
            None => builder.with_simple_exporter(opentelemetry_stdout::LogExporter::default()),
        };

        Ok(builder.build())
    }
}
