//! Domain layer for the Faultline backend
//!
//! Contains the value types shared by every layer: log records sent to the
//! collector, simulated error kinds, and domain errors. No I/O lives here.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

/// Identifier this service reports in every response body and log record
pub const SERVICE_NAME: &str = "backend";
