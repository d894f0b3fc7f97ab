//! Subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::tracer;
use crate::infrastructure::ensure_dir;
use crate::Config;

/// Service and instrumentation scope name attached to exported spans.
const SERVICE_NAME: &str = "abtube";

/// File the span export appends to, inside the data directory.
pub const TRACE_FILE_NAME: &str = "abtube-otlp.json";

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG` when set, else from
/// `config.trace_level`, else `info`. Events go to stderr. When
/// `config.trace_export` is on, spans are also exported as OTLP JSON to
/// [`TRACE_FILE_NAME`] in the data directory; if that directory cannot be
/// created the export is skipped and only stderr logging is installed.
///
/// Only the first call in a process takes effect.
///
/// # Example
///
/// ```no_run
/// use abtube::observability::init_tracing;
/// use abtube::Config;
///
/// let config = Config { trace_level: Some("debug".to_string()), ..Config::default() };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let otel_layer = config
        .trace_export
        .then(|| export_tracer(config))
        .flatten()
        .map(OpenTelemetryLayer::new);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(otel_layer)
        .try_init();
}

fn export_tracer(config: &Config) -> Option<opentelemetry_sdk::trace::Tracer> {
    let data_dir = config.data_dir();
    if ensure_dir(&data_dir).is_err() {
        return None;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider =
        tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);

    Some(provider.tracer(SERVICE_NAME))
}
