//! Application layer - Use cases and orchestration
//!
//! Holds the request counters, the fault-injecting data use case, the
//! latency/error simulations, and the ports the infrastructure layer
//! implements (event sink, fault decider, dependency probe).

pub mod error;
pub mod ports;
pub mod request_context;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use request_context::RequestContext;
pub use services::*;
