//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Every variant is terminal at the handler boundary; nothing here is retried.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Failure injected by the fault injector, no real cause
    #[error("Intentional error for testing")]
    SyntheticFailure,

    /// The external store could not be reached
    #[error("Database connection failed: {0}")]
    DependencyUnavailable(String),

    /// Connected to the external store, but the query failed
    #[error("Database query failed: {0}")]
    DependencyQuery(String),

    /// Error explicitly requested by the caller
    #[error("Error type: {0}")]
    SimulatedFailure(String),
}
