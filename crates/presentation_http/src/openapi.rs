//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 document describing the fault-injection endpoints.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::{handlers, state::AppState};

/// OpenAPI documentation for the backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Faultline Backend API",
        description = "Synthetic backend that injects failures, latency and a database dependency",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "data", description = "Fault-injecting data retrieval"),
        (name = "simulation", description = "Latency and error simulation"),
        (name = "metrics", description = "Request counters")
    ),
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::data::get_data,
        handlers::simulation::slow,
        handlers::simulation::simulate_error,
        handlers::metrics::get_metrics,
        handlers::metrics::get_metrics_prometheus,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::DependencyStatus,
            handlers::data::DataResponse,
            handlers::data::DataPayload,
            handlers::simulation::SlowResponseBody,
            handlers::metrics::MetricsResponse,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
///
/// Adds `/api-docs/openapi.json`.
pub fn create_openapi_routes() -> Router<AppState> {
    let doc = ApiDoc::openapi();
    Router::new().route(
        "/api-docs/openapi.json",
        get(move || {
            let doc = doc.clone();
            async move { Json(doc) }
        }),
    )
}
