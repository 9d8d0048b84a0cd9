//! Latency and error simulation handlers

use application::{ApplicationError, SlowResponse};
use axum::{
    Extension, Json,
    extract::{Query, State, rejection::QueryRejection},
    response::Response,
};
use chrono::{DateTime, Utc};
use domain::{DomainError, SERVICE_NAME, SimulatedErrorKind};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{ApiError, ErrorResponse},
    middleware::RequestId,
    state::AppState,
};

/// Query parameters of `/api/slow`
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct SlowQuery {
    /// Time units to wait (default 3)
    pub delay: Option<u64>,
}

/// Response of `/api/slow`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SlowResponseBody {
    pub service: String,
    pub message: String,
    /// Time units waited
    pub delay: u64,
    pub timestamp: DateTime<Utc>,
}

impl From<SlowResponse> for SlowResponseBody {
    fn from(slow: SlowResponse) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            message: format!("Slow response after {} seconds", slow.delay_units),
            delay: slow.delay_units,
            timestamp: slow.completed_at,
        }
    }
}

/// Respond after a caller-chosen delay
#[utoipa::path(
    get,
    path = "/api/slow",
    tag = "simulation",
    params(
        SlowQuery,
        ("X-Request-ID" = Option<String>, Header, description = "Correlation id reported on errors")
    ),
    responses(
        (status = 200, description = "Responded after the delay", body = SlowResponseBody),
        (status = 400, description = "Malformed delay", body = ErrorResponse)
    )
)]
pub async fn slow(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    query: Result<Query<SlowQuery>, QueryRejection>,
) -> Result<Json<SlowResponseBody>, Response> {
    let Query(query) = query.map_err(|e| {
        ApiError::from(ApplicationError::from(DomainError::invalid_parameter(
            "delay",
            format!("expected a non-negative integer ({})", e.body_text()),
        )))
        .respond_with(request_id.map(|Extension(id)| id.into_inner()))
    })?;

    let slow = state.simulation.slow(query.delay).await;
    Ok(Json(slow.into()))
}

/// Query parameters of `/api/error`
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct ErrorQuery {
    /// Error type; `timeout` holds the request first (default `generic`)
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Always fail with the requested error type
#[utoipa::path(
    get,
    path = "/api/error",
    tag = "simulation",
    params(
        ErrorQuery,
        ("X-Request-ID" = Option<String>, Header, description = "Correlation id reported in the error body")
    ),
    responses(
        (status = 500, description = "The requested error", body = ErrorResponse)
    )
)]
pub async fn simulate_error(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Query(query): Query<ErrorQuery>,
) -> Response {
    let request_id = request_id.map(|Extension(id)| id.into_inner());
    let kind = SimulatedErrorKind::from_param(query.kind.as_deref());
    let err = state
        .simulation
        .simulate_error(&kind, request_id.as_deref())
        .await;
    ApiError::from(err).respond_with(request_id)
}
