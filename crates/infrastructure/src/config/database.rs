//! External database (PostgreSQL) configuration.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Connection parameters for the external store
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host
    #[serde(default = "default_db_host")]
    pub host: String,

    /// Database port
    #[serde(default = "default_db_port")]
    pub port: u16,

    /// Database name
    #[serde(default = "default_db_name")]
    pub name: String,

    /// User to connect as
    #[serde(default = "default_db_user")]
    pub user: String,

    /// Password (sensitive - uses `SecretString`)
    #[serde(skip_serializing, default = "default_db_password")]
    pub password: SecretString,

    /// Bound on establishing a connection, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

fn default_db_host() -> String {
    "postgres-service.database-ns.svc.cluster.local".to_string()
}

const fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "testdb".to_string()
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_password() -> SecretString {
    SecretString::from("postgres")
}

const fn default_connect_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            user: default_db_user(),
            password: default_db_password(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// `host:port/name`, safe to log
    #[must_use]
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.name)
    }
}
