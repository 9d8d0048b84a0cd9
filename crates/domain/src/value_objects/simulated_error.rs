//! Simulated error kinds requested by callers of the error endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of error a caller asked the service to simulate
///
/// Only `timeout` changes behaviour (the response is delayed); every other
/// name is reported back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SimulatedErrorKind {
    /// Hung backend: respond only after the configured timeout delay
    Timeout,
    /// Any other named error, answered immediately
    Other(String),
}

impl SimulatedErrorKind {
    /// Name used when the caller supplies no `type`
    pub const DEFAULT_NAME: &'static str = "generic";

    /// Parse a caller-supplied type name
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == "timeout" {
            Self::Timeout
        } else {
            Self::Other(name.to_string())
        }
    }

    /// Parse an optional type name, falling back to `generic`
    #[must_use]
    pub fn from_param(name: Option<&str>) -> Self {
        Self::parse(name.unwrap_or(Self::DEFAULT_NAME))
    }

    /// The name as supplied by the caller
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Timeout => "timeout",
            Self::Other(name) => name,
        }
    }

    /// Whether the response must be delayed
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl Default for SimulatedErrorKind {
    fn default() -> Self {
        Self::Other(Self::DEFAULT_NAME.to_string())
    }
}

impl From<String> for SimulatedErrorKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<SimulatedErrorKind> for String {
    fn from(kind: SimulatedErrorKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SimulatedErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
