//! Observability setup for Hackpal: structured logging with an optional
//! OpenTelemetry bridge.

pub mod tracing_setup;
