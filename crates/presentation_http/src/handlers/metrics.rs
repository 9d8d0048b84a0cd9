//! Metrics and observability handlers
//!
//! Exposes the request counters as JSON and in Prometheus text format.
//! Reading metrics never changes them.

use application::CounterSnapshot;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use domain::SERVICE_NAME;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Metrics response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    /// Service identifier
    pub service: String,
    /// Data and error requests received
    pub total_requests: u64,
    /// Requests that ended in an error
    pub error_count: u64,
    /// Percentage of successful requests, 0 before the first request
    pub success_rate: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<CounterSnapshot> for MetricsResponse {
    fn from(snapshot: CounterSnapshot) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            total_requests: snapshot.total_requests,
            error_count: snapshot.error_count,
            success_rate: snapshot.success_rate(),
            timestamp: Utc::now(),
        }
    }
}

/// Get metrics endpoint
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "Request counters", body = MetricsResponse)
    )
)]
pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(state.counters.snapshot().into())
}

/// Render counters in Prometheus text exposition format
pub fn render_prometheus(snapshot: &CounterSnapshot, uptime_seconds: u64) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# HELP {SERVICE_NAME}_requests_total Total data and error requests\n\
         # TYPE {SERVICE_NAME}_requests_total counter\n\
         {SERVICE_NAME}_requests_total {}\n\n",
        snapshot.total_requests
    ));

    output.push_str(&format!(
        "# HELP {SERVICE_NAME}_errors_total Requests that ended in an error\n\
         # TYPE {SERVICE_NAME}_errors_total counter\n\
         {SERVICE_NAME}_errors_total {}\n\n",
        snapshot.error_count
    ));

    output.push_str(&format!(
        "# HELP {SERVICE_NAME}_success_rate Percentage of successful requests\n\
         # TYPE {SERVICE_NAME}_success_rate gauge\n\
         {SERVICE_NAME}_success_rate {:.2}\n\n",
        snapshot.success_rate()
    ));

    output.push_str(&format!(
        "# HELP {SERVICE_NAME}_uptime_seconds Service uptime in seconds\n\
         # TYPE {SERVICE_NAME}_uptime_seconds counter\n\
         {SERVICE_NAME}_uptime_seconds {uptime_seconds}\n"
    ));

    output
}

/// Prometheus-style metrics endpoint
#[utoipa::path(
    get,
    path = "/metrics/prometheus",
    tag = "metrics",
    responses(
        (status = 200, description = "Prometheus metrics", content_type = "text/plain")
    )
)]
pub async fn get_metrics_prometheus(State(state): State<AppState>) -> String {
    render_prometheus(&state.counters.snapshot(), state.uptime_seconds())
}
