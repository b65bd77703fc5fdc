//! Observability setup shared by Strasia binaries.

pub mod tracing_setup;
