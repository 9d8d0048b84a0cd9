//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the PostgreSQL probe,
//! the HTTP log forwarder and the probabilistic fault injector. Also owns
//! configuration loading and logging setup.

pub mod chaos;
pub mod config;
pub mod http;
pub mod persistence;
pub mod telemetry;
#[cfg(test)]
pub mod testing;

pub use chaos::{FaultInjectorConfig, FaultInjectorError, ProbabilisticFaultInjector};
pub use config::{AppConfig, DatabaseConfig, LogCollectorConfig, ServerConfig, SimulationConfig};
pub use http::{HttpEventSink, LogForwardError, X_REQUEST_ID, build_event_sink};
pub use persistence::PostgresProbe;
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_logging};
