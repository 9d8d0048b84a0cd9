//! Fault injection and latency simulation configuration.

use std::time::Duration;

use application::SimulationSettings;
use serde::{Deserialize, Serialize};

/// Fault injection knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Probability in `[0, 1]` that a data request fails on purpose
    #[serde(default = "default_error_rate")]
    pub error_rate: f64,

    /// Seed for the injector's RNG; unset = seeded from the OS
    #[serde(default)]
    pub seed: Option<u64>,

    /// Length of one time unit in milliseconds
    #[serde(default = "default_time_unit_ms")]
    pub time_unit_ms: u64,

    /// Units a `timeout` error waits before answering
    #[serde(default = "default_timeout_delay_units")]
    pub timeout_delay_units: u64,

    /// Units the slow endpoint waits when no delay is given
    #[serde(default = "default_slow_delay_units")]
    pub default_slow_delay_units: u64,
}

const fn default_error_rate() -> f64 {
    0.1
}

const fn default_time_unit_ms() -> u64 {
    1000
}

const fn default_timeout_delay_units() -> u64 {
    10
}

const fn default_slow_delay_units() -> u64 {
    3
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            error_rate: default_error_rate(),
            seed: None,
            time_unit_ms: default_time_unit_ms(),
            timeout_delay_units: default_timeout_delay_units(),
            default_slow_delay_units: default_slow_delay_units(),
        }
    }
}

impl SimulationConfig {
    /// Convert to the application layer's `SimulationSettings`
    #[must_use]
    pub const fn to_settings(&self) -> SimulationSettings {
        SimulationSettings {
            time_unit: Duration::from_millis(self.time_unit_ms),
            timeout_delay_units: self.timeout_delay_units,
            default_slow_delay_units: self.default_slow_delay_units,
        }
    }
}
