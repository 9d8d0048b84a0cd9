//! Log record entity
//!
//! A single structured event sent to the external log collector. Records are
//! built per notable event, transmitted once and then discarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{LogLevel, SERVICE_NAME};

/// Structured log event forwarded to the collector
///
/// The JSON body is exactly `{service, level, message, timestamp}`. The
/// correlation id travels out of band (as a request header) and is not part
/// of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Emitting service
    pub service: String,
    /// Severity
    pub level: LogLevel,
    /// Free-form message
    pub message: String,
    /// When the event was recorded
    pub timestamp: DateTime<Utc>,
    /// Request the event belongs to, if any
    #[serde(skip)]
    pub correlation_id: Option<String>,
}

impl LogRecord {
    /// Create a record stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            level,
            message: message.into(),
            timestamp: Utc::now(),
            correlation_id: None,
        }
    }

    /// Create an INFO record
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    /// Create an ERROR record
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    /// Attach the correlation id of the request that produced this record
    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }
}
