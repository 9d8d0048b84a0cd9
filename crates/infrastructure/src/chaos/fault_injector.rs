//! Probabilistic fault injector.

use std::sync::atomic::{AtomicU64, Ordering};

use application::ports::FaultDecider;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SimulationConfig;

/// Errors raised while building an injector
#[derive(Debug, Error, PartialEq)]
pub enum FaultInjectorError {
    /// Rate is NaN or outside `[0, 1]`
    #[error("Invalid fault rate {0}: must be within [0, 1]")]
    InvalidRate(f64),
}

/// Configuration for the fault injector
#[derive(Debug, Clone, PartialEq)]
pub struct FaultInjectorConfig {
    /// Whether fault injection is enabled
    pub enabled: bool,
    /// Probability that a single call is told to fail
    pub fault_rate: f64,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for FaultInjectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fault_rate: 0.1,
            seed: None,
        }
    }
}

impl FaultInjectorConfig {
    /// Enabled injector with the given rate
    pub const fn with_rate(fault_rate: f64) -> Self {
        Self {
            enabled: true,
            fault_rate,
            seed: None,
        }
    }

    /// Config with fault injection disabled
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            fault_rate: 0.0,
            seed: None,
        }
    }

    /// Fix the RNG seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl From<&SimulationConfig> for FaultInjectorConfig {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            enabled: true,
            fault_rate: config.error_rate,
            seed: config.seed,
        }
    }
}

/// Statistics about fault injection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultInjectorStats {
    /// Total number of decisions made
    pub total_calls: u64,
    /// Number of decisions that said "fail"
    pub faults_injected: u64,
}

impl FaultInjectorStats {
    /// Observed fault rate
    #[allow(clippy::cast_precision_loss)]
    pub fn actual_fault_rate(&self) -> f64 {
        if self.total_calls == 0 {
            0.0
        } else {
            self.faults_injected as f64 / self.total_calls as f64
        }
    }
}

/// Fails each call independently with probability `fault_rate`
#[derive(Debug)]
pub struct ProbabilisticFaultInjector {
    config: FaultInjectorConfig,
    rng: Mutex<StdRng>,
    total_calls: AtomicU64,
    faults_injected: AtomicU64,
}

impl ProbabilisticFaultInjector {
    /// Create an injector from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `FaultInjectorError::InvalidRate` if the rate is not in `[0, 1]`.
    pub fn new(config: FaultInjectorConfig) -> Result<Self, FaultInjectorError> {
        if !(0.0..=1.0).contains(&config.fault_rate) {
            return Err(FaultInjectorError::InvalidRate(config.fault_rate));
        }

        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        Ok(Self {
            config,
            rng: Mutex::new(rng),
            total_calls: AtomicU64::new(0),
            faults_injected: AtomicU64::new(0),
        })
    }

    /// Create a disabled injector (never fails)
    pub fn disabled() -> Self {
        Self {
            config: FaultInjectorConfig::disabled(),
            rng: Mutex::new(StdRng::seed_from_u64(0)),
            total_calls: AtomicU64::new(0),
            faults_injected: AtomicU64::new(0),
        }
    }

    /// Configured rate
    pub const fn fault_rate(&self) -> f64 {
        self.config.fault_rate
    }

    /// Current statistics
    pub fn stats(&self) -> FaultInjectorStats {
        FaultInjectorStats {
            total_calls: self.total_calls.load(Ordering::Relaxed),
            faults_injected: self.faults_injected.load(Ordering::Relaxed),
        }
    }

    fn should_inject(&self) -> bool {
        if !self.config.enabled || self.config.fault_rate <= 0.0 {
            return false;
        }
        if self.config.fault_rate >= 1.0 {
            return true;
        }
        self.rng.lock().random::<f64>() < self.config.fault_rate
    }
}

impl FaultDecider for ProbabilisticFaultInjector {
    fn decide(&self) -> bool {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        let inject = self.should_inject();
        if inject {
            self.faults_injected.fetch_add(1, Ordering::Relaxed);
        }
        inject
    }
}
