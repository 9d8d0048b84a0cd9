//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, middleware::RequestIdLayer, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Fault injection
        .route("/api/data", get(handlers::data::get_data))
        .route("/api/slow", get(handlers::simulation::slow))
        .route("/api/error", get(handlers::simulation::simulate_error))
        // Metrics endpoints
        .route("/metrics", get(handlers::metrics::get_metrics))
        .route("/metrics/prometheus", get(handlers::metrics::get_metrics_prometheus))
        // API documentation
        .merge(openapi::create_openapi_routes())
        .layer(RequestIdLayer::new())
        // Attach state
        .with_state(state)
}
