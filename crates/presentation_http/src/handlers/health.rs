//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use domain::SERVICE_NAME;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness check - is the server running?
///
/// Touches neither the database nor the request counters.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: Utc::now(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: DependencyStatus,
}

/// Status of the database dependency
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DependencyStatus {
    pub reachable: bool,
}

/// Readiness check - can the database be reached?
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = ReadinessResponse),
        (status = 503, description = "Database unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let reachable = state.probe.is_reachable().await;

    let status_code = if reachable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready: reachable,
            database: DependencyStatus { reachable },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_healthy() {
        let Json(resp) = health_check().await;
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.service, "backend");
    }

    #[test]
    fn health_response_serialization() {
        let resp = HealthResponse {
            status: "healthy".to_string(),
            service: "backend".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "backend");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn readiness_response_serialization() {
        let resp = ReadinessResponse {
            ready: false,
            database: DependencyStatus { reachable: false },
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"ready\":false"));
        assert!(json.contains("\"reachable\":false"));
    }
}
