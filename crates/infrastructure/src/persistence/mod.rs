//! Persistence adapters
//!
//! The service keeps no state of its own; the only store it talks to is the
//! external PostgreSQL database it probes on every data request.

mod postgres_probe;

pub use postgres_probe::{PostgresProbe, REACHABILITY_QUERY, TABLE_COUNT_QUERY};
