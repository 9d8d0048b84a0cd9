//! Process-wide request counters
//!
//! Two monotonically increasing counters shared by every concurrent request:
//! attempts on the counted paths and errors among them. The counters are an
//! explicitly owned object handed to the services, so they can be exercised
//! without a running server.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Atomic request and error counters
///
/// `error_count` is only ever incremented after the matching
/// `total_requests` increment, and snapshots read `error_count` first, so a
/// snapshot never reports more errors than requests.
#[derive(Debug, Default)]
pub struct RequestCounters {
    total_requests: AtomicU64,
    error_count: AtomicU64,
}

impl RequestCounters {
    /// Create counters starting at zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
        }
    }

    /// Count one attempt; returns the counter value after this increment
    pub fn record_attempt(&self) -> u64 {
        self.total_requests.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Count one error
    pub fn record_error(&self) {
        self.error_count.fetch_add(1, Ordering::AcqRel);
    }

    /// Read both counters without incrementing them
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        let error_count = self.error_count.load(Ordering::Acquire);
        let total_requests = self.total_requests.load(Ordering::Acquire);
        CounterSnapshot {
            total_requests,
            error_count,
        }
    }
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSnapshot {
    /// Attempts on the counted paths
    pub total_requests: u64,
    /// Errors among those attempts
    pub error_count: u64,
}

impl CounterSnapshot {
    /// Percentage of attempts that did not fail, in `[0, 100]`
    ///
    /// Defined as `0` when nothing has been counted yet.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        let successes = self.total_requests.saturating_sub(self.error_count);
        (successes as f64 / self.total_requests as f64 * 100.0).clamp(0.0, 100.0)
    }
}
