//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A simulation parameter could not be interpreted
    #[error("Invalid simulation parameter {name}: {reason}")]
    InvalidSimulationParameter { name: String, reason: String },

    /// Unknown log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

impl DomainError {
    /// Create an invalid simulation parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSimulationParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
