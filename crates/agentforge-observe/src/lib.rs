//! Observability for AgentForge: the global tracing subscriber and the
//! handle that lets admins change the log filter at runtime.

pub mod tracing_setup;

pub use tracing_setup::{
    LogHandle, ObserveError, TracingOptions, init_tracing, resolve_filter, shutdown_tracing,
};
