//! Fault injection for the data endpoint.
//!
//! `ProbabilisticFaultInjector` decides, per call, whether a request should
//! fail on purpose. It implements the application's `FaultDecider` port.

mod fault_injector;

pub use fault_injector::{
    FaultInjectorConfig, FaultInjectorError, FaultInjectorStats, ProbabilisticFaultInjector,
};
