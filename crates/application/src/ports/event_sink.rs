//! Port for best-effort structured event emission
//!
//! Emission is fire-and-forget: the caller never learns whether a record
//! reached the collector, and a failing sink must never change the response
//! being built.

#[cfg(test)]
use mockall::automock;
use parking_lot::Mutex;

use domain::{LogLevel, LogRecord};

/// Capability to emit a log record to the outside world
#[cfg_attr(test, automock)]
pub trait EventSink: Send + Sync {
    /// Hand a record over for delivery; must not block on delivery
    fn emit(&self, record: LogRecord);
}

/// Sink that drops every record (collector disabled)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, record: LogRecord) {
        tracing::trace!(level = %record.level, message = %record.message, "Log forwarding disabled");
    }
}

/// Sink that keeps records in memory, for tests
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingEventSink {
    /// Create an empty recording sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything emitted so far
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Number of records at the given level
    #[must_use]
    pub fn count_level(&self, level: LogLevel) -> usize {
        self.records.lock().iter().filter(|r| r.level == level).count()
    }

    /// Number of records emitted so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether nothing has been emitted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, record: LogRecord) {
        self.records.lock().push(record);
    }
}
