//! Log level value object
//!
//! Severity attached to records forwarded to the log collector.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Severity of a forwarded log record
///
/// Serialized in upper case (`"INFO"`, `"ERROR"`), which is what the
/// collector expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Normal request outcome
    #[default]
    Info,
    /// Injected or genuine failure
    Error,
}

impl LogLevel {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Error => "ERROR",
        }
    }

    /// Check if this level marks a failure
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INFO" => Ok(Self::Info),
            "ERROR" => Ok(Self::Error),
            _ => Err(DomainError::InvalidLogLevel(s.to_string())),
        }
    }
}
