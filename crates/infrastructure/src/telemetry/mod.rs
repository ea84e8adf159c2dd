//! Logging setup
//!
//! Console logging through `tracing-subscriber`, as human-readable text or
//! one JSON object per line. `RUST_LOG` overrides the configured filter.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
