//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! # Usage
//!
//! ```no_run
//! use agentforge_observe::{TracingOptions, init_tracing};
//!
//! let handle = init_tracing(&TracingOptions {
//!     filter: "info".into(),
//!     json: false,
//!     otel: false,
//! })
//! .unwrap();
//! handle.set_filter("agentforge=debug,info").unwrap();
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

use agentforge_core::service::admin::LogLevelControl;

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ObserveError {
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("tracing subscriber could not be installed: {0}")]
    Init(String),

    #[error("log filter could not be reloaded: {0}")]
    Reload(String),
}

/// How the global subscriber is set up.
#[derive(Debug, Clone)]
pub struct TracingOptions {
    /// `EnvFilter` directive, e.g. `info` or `agentforge=debug,tower_http=info`.
    pub filter: String,
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
    /// Bridge spans to OpenTelemetry with the stdout exporter.
    pub otel: bool,
}

/// Pick the filter directive: `RUST_LOG` wins, then `-v` flags, then the
/// configured level. `--quiet` only lowers the configured level.
pub fn resolve_filter(rust_log: Option<String>, verbosity: u8, quiet: bool, configured: &str) -> String {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive;
    }
    match verbosity {
        0 if quiet => "error".to_string(),
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter, ObserveError> {
    EnvFilter::try_new(directive).map_err(|e| ObserveError::InvalidFilter {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Runtime handle to the installed log filter.
#[derive(Clone)]
pub struct LogHandle {
    inner: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Replace the active filter.
    pub fn set_filter(&self, directive: &str) -> Result<(), ObserveError> {
        let filter = parse_filter(directive)?;
        self.inner
            .reload(filter)
            .map_err(|e| ObserveError::Reload(e.to_string()))?;
        Ok(())
    }

    /// The active filter, rendered as a directive string.
    pub fn current(&self) -> Option<String> {
        self.inner.with_current(|filter| filter.to_string()).ok()
    }
}

impl LogLevelControl for LogHandle {
    fn set_level(&self, directive: &str) -> Result<(), String> {
        self.set_filter(directive).map_err(|e| e.to_string())
    }
}

/// Initialize the global tracing subscriber.
///
/// - Installs a `fmt` layer on stderr (plain or JSON) behind a reloadable
///   `EnvFilter`.
/// - When `otel` is set, additionally bridges tracing spans to OpenTelemetry
///   using a stdout exporter.
///
/// # Errors
///
/// Returns an error if the filter does not parse or the global subscriber has
/// already been set.
pub fn init_tracing(options: &TracingOptions) -> Result<LogHandle, ObserveError> {
    let (filter_layer, handle) = reload::Layer::new(parse_filter(&options.filter)?);

    let plain_layer = (!options.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });
    let json_layer = options.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    let otel_layer = options.otel.then(|| {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("agentforge");
        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);
        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(plain_layer)
        .with(json_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| ObserveError::Init(e.to_string()))?;

    Ok(LogHandle { inner: handle })
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// No-op when OTel was not enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_wins() {
        assert_eq!(resolve_filter(Some("warn".into()), 2, false, "info"), "warn");
    }

    #[test]
    fn test_verbosity_then_config() {
        assert_eq!(resolve_filter(None, 0, false, "info"), "info");
        assert_eq!(resolve_filter(Some("  ".into()), 1, false, "info"), "debug");
        assert_eq!(resolve_filter(None, 3, false, "info"), "trace");
        assert_eq!(resolve_filter(None, 0, true, "info"), "error");
    }

    #[test]
    fn test_reload_through_log_level_control() {
        let (layer, handle) = reload::Layer::<EnvFilter, Registry>::new(EnvFilter::new("info"));
        let log = LogHandle { inner: handle };

        log.set_level("agentforge=debug").unwrap();
        assert_eq!(log.current().as_deref(), Some("agentforge=debug"));
        assert!(log.set_level("agentforge=notalevel").is_err());
        drop(layer);
    }
}
