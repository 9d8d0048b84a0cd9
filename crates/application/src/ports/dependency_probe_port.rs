//! Dependency probe port
//!
//! Defines the interface for contacting the external relational store with a
//! single read-only introspection query.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Why a probe failed
///
/// Connection and query failures are kept apart because they map to
/// different status codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Could not establish a connection (refused, unreachable, timed out)
    #[error("connection failed: {0}")]
    Connection(String),

    /// Connected, but the query did not complete
    #[error("query failed: {0}")]
    Query(String),
}

impl ProbeError {
    /// Underlying error text without the category prefix
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Connection(msg) | Self::Query(msg) => msg,
        }
    }
}

/// Port for probing the external store
///
/// Implementations acquire a connection per call and must release it on every
/// exit path.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DependencyProbePort: Send + Sync {
    /// Run the fixed introspection query and return its scalar count
    async fn count_tables(&self) -> Result<i64, ProbeError>;

    /// Lightweight reachability check used by readiness
    async fn is_reachable(&self) -> bool;
}
