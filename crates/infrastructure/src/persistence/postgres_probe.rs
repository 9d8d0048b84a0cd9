//! PostgreSQL dependency probe
//!
//! Implements the `DependencyProbePort` with a fresh sqlx connection per
//! call. Connections are closed on every exit path; nothing is pooled.

use std::time::Duration;

use application::ports::{DependencyProbePort, ProbeError};
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use secrecy::ExposeSecret;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tracing::{debug, instrument, warn};

use crate::config::DatabaseConfig;

/// Introspection query whose scalar result is reported as `tableCount`
pub const TABLE_COUNT_QUERY: &str = "SELECT COUNT(*) FROM information_schema.tables";

/// Query used by readiness checks
pub const REACHABILITY_QUERY: &str = "SELECT 1";

/// Probe that connects, runs one query and disconnects
#[derive(Clone)]
pub struct PostgresProbe {
    options: PgConnectOptions,
    connect_timeout: Duration,
    target: String,
}

impl std::fmt::Debug for PostgresProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresProbe")
            .field("target", &self.target)
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}

impl PostgresProbe {
    /// Build a probe from database configuration
    #[must_use]
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(config.password.expose_secret());

        Self {
            options,
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            target: config.target(),
        }
    }

    /// Override the connection-establish bound
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// `host:port/name` of the probed database
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    async fn connect(&self) -> Result<PgConnection, ProbeError> {
        match tokio::time::timeout(self.connect_timeout, PgConnection::connect_with(&self.options))
            .await
        {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(ProbeError::Connection(e.to_string())),
            Err(_) => Err(ProbeError::Connection(format!(
                "connection to {} timed out after {:?}",
                self.target, self.connect_timeout
            ))),
        }
    }

    /// Run `op` on a fresh connection and close it afterwards
    ///
    /// The connection is closed whether `op` succeeds or fails; if the
    /// returned future is dropped midway the connection is dropped with it.
    async fn with_connection<T, F>(&self, op: F) -> Result<T, ProbeError>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, sqlx::Error>>,
    {
        let mut conn = self.connect().await?;
        let result = op(&mut conn).await;
        if let Err(e) = conn.close().await {
            debug!(target_db = %self.target, error = %e, "Error while closing probe connection");
        }
        result.map_err(|e| ProbeError::Query(e.to_string()))
    }
}

#[async_trait]
impl DependencyProbePort for PostgresProbe {
    #[instrument(skip(self), fields(target_db = %self.target))]
    async fn count_tables(&self) -> Result<i64, ProbeError> {
        let count = self
            .with_connection(|conn| {
                sqlx::query_scalar::<_, i64>(TABLE_COUNT_QUERY)
                    .fetch_one(conn)
                    .boxed()
            })
            .await?;
        debug!(table_count = count, "Database probe succeeded");
        Ok(count)
    }

    #[instrument(skip(self), fields(target_db = %self.target))]
    async fn is_reachable(&self) -> bool {
        // SELECT 1 yields INT4
        let result = self
            .with_connection(|conn| {
                sqlx::query_scalar::<_, i32>(REACHABILITY_QUERY)
                    .fetch_one(conn)
                    .boxed()
            })
            .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Database reachability check failed");
                false
            },
        }
    }
}
