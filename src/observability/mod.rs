//! Observability for `psych-report`.
//!
//! Structured logging through `tracing`, written to stderr so command output
//! on stdout stays machine-readable.

pub mod logging;

pub use logging::{LogFormat, init_logging};
