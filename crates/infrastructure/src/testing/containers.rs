//! PostgreSQL container wrapper for testcontainers.

use secrecy::SecretString;
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Configuration for PostgreSQL container
#[derive(Debug, Clone)]
pub struct PostgresContainerConfig {
    /// Database name to create
    pub database: String,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// Postgres version tag (e.g., "16-alpine")
    pub version: String,
}

impl Default for PostgresContainerConfig {
    fn default() -> Self {
        Self {
            database: "testdb".to_string(),
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            version: "16-alpine".to_string(),
        }
    }
}

/// Running PostgreSQL container, removed on drop
#[derive(Debug)]
pub struct PostgresContainer {
    #[allow(dead_code)]
    container: ContainerAsync<Postgres>,
    config: PostgresContainerConfig,
    host: String,
    port: u16,
}

impl PostgresContainer {
    /// Start a new PostgreSQL container with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start.
    pub async fn start() -> Result<Self, ContainerError> {
        Self::start_with_config(PostgresContainerConfig::default()).await
    }

    /// Start a new PostgreSQL container with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start.
    pub async fn start_with_config(
        config: PostgresContainerConfig,
    ) -> Result<Self, ContainerError> {
        info!(
            database = %config.database,
            version = %config.version,
            "Starting PostgreSQL container"
        );

        let container = Postgres::default()
            .with_db_name(&config.database)
            .with_user(&config.username)
            .with_password(&config.password)
            .with_tag(&config.version)
            .start()
            .await
            .map_err(|e| ContainerError::Start(e.to_string()))?;

        let host = container
            .get_host()
            .await
            .map_err(|e| ContainerError::Start(e.to_string()))?
            .to_string();

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .map_err(|e| ContainerError::Start(e.to_string()))?;

        debug!(host = %host, port = %port, "PostgreSQL container started");

        Ok(Self {
            container,
            config,
            host,
            port,
        })
    }

    /// Database configuration pointing at this container
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            host: self.host.clone(),
            port: self.port,
            name: self.config.database.clone(),
            user: self.config.username.clone(),
            password: SecretString::from(self.config.password.clone()),
            connect_timeout_secs: 5,
        }
    }

    /// Get the host address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the mapped port.
    pub const fn port(&self) -> u16 {
        self.port
    }
}

/// Errors raised by container helpers
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Container failed to start
    #[error("Container failed to start: {0}")]
    Start(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_service_defaults() {
        let config = PostgresContainerConfig::default();
        assert_eq!(config.database, "testdb");
        assert_eq!(config.username, "postgres");
    }

    #[test]
    fn container_error_display() {
        let err = ContainerError::Start("no docker".to_string());
        assert_eq!(err.to_string(), "Container failed to start: no docker");
    }
}
