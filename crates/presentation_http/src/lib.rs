//! Faultline HTTP presentation layer
//!
//! Router, handlers and middleware for the fault-injection backend.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, CorrelatedApiError, set_expose_internal_errors};
pub use middleware::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use routes::create_router;
pub use server::{ShutdownOutcome, serve};
pub use state::AppState;
