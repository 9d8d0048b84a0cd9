//! Application services - Use case implementations

mod data_service;
mod request_counters;
mod simulation_service;

pub use data_service::{DataService, TableSnapshot};
pub use request_counters::{CounterSnapshot, RequestCounters};
pub use simulation_service::{SimulationService, SimulationSettings, SlowResponse};
