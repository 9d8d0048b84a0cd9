//! Value Objects - Immutable, identity-less domain primitives

mod log_level;
mod simulated_error;

pub use log_level::LogLevel;
pub use simulated_error::SimulatedErrorKind;
