//! Application state shared across handlers

use std::sync::Arc;
use std::time::Instant;

use application::{DataService, DependencyProbePort, RequestCounters, SimulationService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Fault-injecting data retrieval
    pub data_service: Arc<DataService>,
    /// Slow and error simulations
    pub simulation: Arc<SimulationService>,
    /// Process-wide request counters
    pub counters: Arc<RequestCounters>,
    /// Database probe, used by readiness
    pub probe: Arc<dyn DependencyProbePort>,
    /// When the process started serving
    pub started_at: Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("counters", &self.counters)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Seconds since the process started serving
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
