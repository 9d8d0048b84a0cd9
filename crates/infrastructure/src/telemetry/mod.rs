//! Local logging setup
//!
//! Console (text or JSON) logging through `tracing-subscriber`. Records meant
//! for the central collector go through the log forwarder instead.

mod logging;

pub use logging::{DEFAULT_LOG_FILTER, LogFormat, TelemetryConfig, TelemetryError, init_logging};
