//! Testing utilities for infrastructure tests.
//!
//! Runs a real PostgreSQL instance with testcontainers so the probe can be
//! exercised end to end. Tests that use it need Docker and are `#[ignore]`d.

mod containers;

pub use containers::{ContainerError, PostgresContainer, PostgresContainerConfig};
