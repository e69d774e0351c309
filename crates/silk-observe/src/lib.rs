//! Observability setup for the SILK assistant.

pub mod tracing_setup;
