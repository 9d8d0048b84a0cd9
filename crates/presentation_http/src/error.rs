//! API error handling
//!
//! Maps application errors onto status codes and a JSON body carrying the
//! service identifier. Details of internal failures are only exposed when
//! `server.expose_internal_errors` is set; otherwise they are sanitized.

use application::ApplicationError;
use axum::{
    Json,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use domain::SERVICE_NAME;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use utoipa::ToSchema;

use crate::middleware::REQUEST_ID_HEADER;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details should be exposed in responses.
///
/// With `false`, database errors and other internal failures are replaced by
/// generic messages so connection strings or hostnames do not leak.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

const GENERIC_MESSAGE: &str = "An error occurred processing your request";

/// Sanitize an error message to remove potentially sensitive information
///
/// This function removes:
/// - File paths
/// - Database connection strings
/// - Stack trace information
/// - Connection details
fn sanitize_error_message(msg: &str, expose: bool) -> String {
    if expose {
        return msg.to_string();
    }

    let sensitive_patterns = [
        // File paths
        "/home/",
        "/Users/",
        "/var/",
        "/etc/",
        "\\Users\\",
        "C:\\",
        // Database patterns
        "postgres://",
        "postgresql://",
        "password",
        "role \"",
        // Stack trace indicators
        "stack backtrace",
        "panicked at",
        " at ",
        ".rs:",
        // Connection details
        "connection refused",
        "ECONNREFUSED",
        "timeout",
        "timed out",
    ];

    let msg_lower = msg.to_lowercase();
    for pattern in &sensitive_patterns {
        if msg_lower.contains(&pattern.to_lowercase()) {
            return GENERIC_MESSAGE.to_string();
        }
    }

    if msg.contains("://") || msg.contains('/') && msg.len() > 50 {
        return GENERIC_MESSAGE.to_string();
    }

    msg.to_string()
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Failure injected by the fault injector
    #[error("Intentional error for testing")]
    SyntheticFailure,

    /// Could not connect to the database
    #[error("Database connection failed: {0}")]
    DatabaseUnavailable(String),

    /// Connected, but the probe query failed
    #[error("Database query failed: {0}")]
    DatabaseQuery(String),

    /// Error the caller asked for on `/api/error`
    #[error("Error type: {0}")]
    Simulated(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Machine readable error code
    pub code: String,
    /// Service identifier
    pub service: String,
    /// Correlation id of the failed request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// When the error was produced
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::SyntheticFailure
            | Self::DatabaseQuery(_)
            | Self::Simulated(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine readable code reported in the body
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::SyntheticFailure => "synthetic_error",
            Self::DatabaseUnavailable(_) => "database_unavailable",
            Self::DatabaseQuery(_) => "database_query_failed",
            Self::Simulated(_) => "simulated_error",
        }
    }

    /// Attach the request's correlation id to the response
    pub fn with_request_id(self, request_id: impl Into<String>) -> CorrelatedApiError {
        CorrelatedApiError {
            error: self,
            request_id: request_id.into(),
        }
    }

    /// Render the error, correlated when the caller sent an id
    pub fn respond_with(self, request_id: Option<String>) -> Response {
        match request_id {
            Some(id) => self.with_request_id(id).into_response(),
            None => self.into_response(),
        }
    }

    fn body(&self, request_id: Option<String>, expose: bool) -> ErrorResponse {
        let (error, details) = match self {
            Self::BadRequest(msg) => (msg.clone(), None),
            Self::SyntheticFailure => (self.to_string(), None),
            Self::DatabaseUnavailable(msg) => (
                "Database connection failed".to_string(),
                expose.then(|| msg.clone()),
            ),
            Self::DatabaseQuery(msg) => (sanitize_error_message(msg, expose), None),
            Self::Simulated(_) => (self.to_string(), None),
        };

        ErrorResponse {
            error,
            code: self.code().to_string(),
            service: SERVICE_NAME.to_string(),
            request_id,
            details,
            timestamp: Utc::now(),
        }
    }

    fn render(&self, request_id: Option<String>, expose: bool) -> Response {
        (self.status(), Json(self.body(request_id, expose))).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.render(None, should_expose_details())
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::SyntheticFailure => Self::SyntheticFailure,
            ApplicationError::DependencyUnavailable(msg) => Self::DatabaseUnavailable(msg),
            ApplicationError::DependencyQuery(msg) => Self::DatabaseQuery(msg),
            ApplicationError::SimulatedFailure(kind) => Self::Simulated(kind),
        }
    }
}

/// An `ApiError` tied to a request's correlation id
///
/// The id is reported in the body as `requestId` and echoed in the
/// `X-Request-ID` response header.
#[derive(Debug, Error)]
#[error("{error} (request {request_id})")]
pub struct CorrelatedApiError {
    error: ApiError,
    request_id: String,
}

impl CorrelatedApiError {
    /// The wrapped error
    pub const fn error(&self) -> &ApiError {
        &self.error
    }

    /// Correlation id of the failed request
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl IntoResponse for CorrelatedApiError {
    fn into_response(self) -> Response {
        let mut response = self
            .error
            .render(Some(self.request_id.clone()), should_expose_details());
        if let Ok(value) = HeaderValue::from_str(&self.request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
}
