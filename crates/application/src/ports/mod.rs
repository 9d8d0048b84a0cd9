//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod dependency_probe_port;
mod event_sink;
mod fault_decider;

#[cfg(test)]
pub use dependency_probe_port::MockDependencyProbePort;
pub use dependency_probe_port::{DependencyProbePort, ProbeError};
#[cfg(test)]
pub use event_sink::MockEventSink;
pub use event_sink::{EventSink, NoopEventSink, RecordingEventSink};
#[cfg(test)]
pub use fault_decider::MockFaultDecider;
pub use fault_decider::{FaultDecider, FixedFaultDecider};
