//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: PostgreSQL connection parameters
//! - `log_collector`: where log records are forwarded
//! - `simulation`: fault injection and latency knobs
//!
//! Sources are layered, later ones win: built-in defaults, an optional
//! `config.toml`, `FAULTLINE__SECTION__KEY` variables and finally the flat
//! deployment variables (`DB_HOST`, `LOGGING_SERVICE_URL`, ...).

mod database;
mod log_collector;
mod server;
mod simulation;

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

pub use database::DatabaseConfig;
pub use log_collector::LogCollectorConfig;
pub use server::ServerConfig;
pub use simulation::SimulationConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Prefix for structured environment overrides
pub const ENV_PREFIX: &str = "FAULTLINE";

/// Flat variables used by existing deployments, mapped to their config keys
pub const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_NAME", "database.name"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("LOGGING_SERVICE_URL", "log_collector.base_url"),
];

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    /// External database probed by `/api/data`
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Log collector
    #[serde(default)]
    pub log_collector: LogCollectorConfig,

    /// Fault injection and latency simulation
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Local logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from the process environment and optional file
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result fails
    /// [`AppConfig::validate`].
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_env(std::env::vars().collect())
    }

    /// Load configuration using `vars` in place of the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result fails
    /// [`AppConfig::validate`].
    pub fn load_from_env(vars: config::Map<String, String>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with prefixed variables (e.g., FAULTLINE__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            );

        for (var, key) in LEGACY_ENV_KEYS {
            let value = vars.get(*var).filter(|v| !v.is_empty()).cloned();
            builder = builder.set_override_option(*key, value)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the services cannot run with
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` for an error rate outside `[0, 1]`
    /// or a zero time unit.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let rate = self.simulation.error_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(config::ConfigError::Message(format!(
                "simulation.error_rate must be within [0, 1], got {rate}"
            )));
        }
        if self.simulation.time_unit_ms == 0 {
            return Err(config::ConfigError::Message(
                "simulation.time_unit_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
