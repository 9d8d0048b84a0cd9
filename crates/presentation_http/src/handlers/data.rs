//! Data retrieval handler
//!
//! Each call counts as one request. It either fails on purpose or reports
//! the number of tables the database lists.

use application::TableSnapshot;
use axum::{
    Extension, Json,
    extract::State,
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use domain::SERVICE_NAME;
use serde::{Deserialize, Serialize};
use tracing::Span;
use utoipa::ToSchema;

use crate::{
    error::{ApiError, CorrelatedApiError, ErrorResponse},
    middleware::{REQUEST_ID_HEADER, RequestId},
    state::AppState,
};

/// Successful data response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataResponse {
    pub service: String,
    pub request_id: String,
    pub data: DataPayload,
}

/// Result of the database probe
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataPayload {
    pub message: String,
    pub table_count: i64,
    pub timestamp: DateTime<Utc>,
}

impl From<TableSnapshot> for DataPayload {
    fn from(snapshot: TableSnapshot) -> Self {
        Self {
            message: TableSnapshot::MESSAGE.to_string(),
            table_count: snapshot.table_count,
            timestamp: snapshot.retrieved_at,
        }
    }
}

/// Fetch data, subject to fault injection
#[utoipa::path(
    get,
    path = "/api/data",
    tag = "data",
    params(
        ("X-Request-ID" = Option<String>, Header, description = "Correlation id, generated when absent")
    ),
    responses(
        (status = 200, description = "Table count retrieved", body = DataResponse),
        (status = 500, description = "Injected failure or query failure", body = ErrorResponse),
        (status = 503, description = "Database connection failed", body = ErrorResponse)
    )
)]
pub async fn get_data(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
) -> Result<Response, CorrelatedApiError> {
    let inbound = request_id.map(|Extension(id)| id.into_inner());
    let (ctx, result) = state.data_service.handle(inbound).await;

    if ctx.is_synthesized() {
        Span::current().record("request_id", ctx.request_id());
    }

    let snapshot = result.map_err(|e| ApiError::from(e).with_request_id(ctx.request_id()))?;

    let mut response = Json(DataResponse {
        service: SERVICE_NAME.to_string(),
        request_id: ctx.request_id().to_string(),
        data: snapshot.into(),
    })
    .into_response();

    if let Ok(value) = HeaderValue::from_str(ctx.request_id()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    Ok(response)
}
