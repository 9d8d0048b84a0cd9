//! Latency and error simulation
//!
//! Backs the slow and error endpoints. Delays are expressed in time units so
//! the same behaviour can be exercised quickly in tests; suspension always
//! goes through `tokio::time::sleep`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{LogRecord, SimulatedErrorKind};
use tokio::time::sleep;
use tracing::{info, instrument};

use crate::error::ApplicationError;
use crate::ports::EventSink;

use super::RequestCounters;

/// Timing knobs for the simulations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSettings {
    /// Length of one time unit
    pub time_unit: Duration,
    /// Units a `timeout` error waits before answering
    pub timeout_delay_units: u64,
    /// Units the slow endpoint waits when no delay is given
    pub default_slow_delay_units: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            time_unit: Duration::from_secs(1),
            timeout_delay_units: 10,
            default_slow_delay_units: 3,
        }
    }
}

impl SimulationSettings {
    /// Convert a number of units into wall-clock time, saturating on overflow
    #[must_use]
    pub fn units(&self, units: u64) -> Duration {
        u32::try_from(units)
            .ok()
            .and_then(|n| self.time_unit.checked_mul(n))
            .unwrap_or(Duration::MAX)
    }
}

/// Outcome of a slow request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlowResponse {
    /// Requested delay in units
    pub delay_units: u64,
    /// Wall-clock time that was waited
    pub waited: Duration,
    /// When the wait finished
    pub completed_at: DateTime<Utc>,
}

/// Slow and error simulations
pub struct SimulationService {
    counters: Arc<RequestCounters>,
    events: Arc<dyn EventSink>,
    settings: SimulationSettings,
}

impl fmt::Debug for SimulationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SimulationService {
    /// Create the service
    pub fn new(
        counters: Arc<RequestCounters>,
        events: Arc<dyn EventSink>,
        settings: SimulationSettings,
    ) -> Self {
        Self {
            counters,
            events,
            settings,
        }
    }

    /// Current settings
    #[must_use]
    pub const fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Wait `delay_units` (or the default) and report how long that was
    ///
    /// Not counted in the request counters.
    #[instrument(skip(self))]
    pub async fn slow(&self, delay_units: Option<u64>) -> SlowResponse {
        let delay_units = delay_units.unwrap_or(self.settings.default_slow_delay_units);
        let waited = self.settings.units(delay_units);
        if !waited.is_zero() {
            sleep(waited).await;
        }
        info!(delay_units, ?waited, "Slow response completed");
        SlowResponse {
            delay_units,
            waited,
            completed_at: Utc::now(),
        }
    }

    /// Produce the error the caller asked for
    ///
    /// Counts one attempt and one error, reports the call to the event sink
    /// (tagged with the caller's correlation id, if any) and, for `timeout`,
    /// holds the request for the configured delay first.
    #[instrument(skip(self, kind), fields(kind = %kind))]
    pub async fn simulate_error(
        &self,
        kind: &SimulatedErrorKind,
        request_id: Option<&str>,
    ) -> ApplicationError {
        self.counters.record_attempt();
        self.counters.record_error();

        let mut record = LogRecord::error(format!("Error endpoint called with type: {kind}"));
        if let Some(id) = request_id {
            record = record.with_correlation_id(id);
        }
        self.events.emit(record);

        if kind.is_timeout() {
            let delay = self.settings.units(self.settings.timeout_delay_units);
            info!(?delay, "Holding request to simulate a hung backend");
            sleep(delay).await;
        }

        ApplicationError::SimulatedFailure(kind.to_string())
    }
}
