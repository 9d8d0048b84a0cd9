//! Request ID middleware for HTTP request correlation
//!
//! Picks up the caller's `X-Request-ID` header (any UTF-8 string, used verbatim),
//! makes it available to handlers and opens the `http_request` tracing span.
//! Requests without the header get an id later, from the handler that counts
//! them, so the span field starts empty and is recorded by that handler.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue},
    response::Response,
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::Instrument;

/// The header name for the request ID
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Layer that adds request ID handling to HTTP services
#[derive(Debug, Clone, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    /// Create a new request ID layer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service that extracts the inbound request ID for each request
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let inbound = request
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        let method = request.method().to_string();
        let uri = request.uri().path().to_string();
        let span = tracing::info_span!(
            "http_request",
            request_id = tracing::field::Empty,
            method = %method,
            uri = %uri,
        );

        if let Some(id) = &inbound {
            span.record("request_id", id.as_str());
            request.extensions_mut().insert(RequestId(id.clone()));
        }

        let mut inner = self.inner.clone();

        Box::pin(
            async move {
                let mut response = inner.call(request).await?;

                // Handlers that resolved their own id have set the header already
                if let Some(id) = inbound {
                    if !response.headers().contains_key(&REQUEST_ID_HEADER) {
                        if let Ok(value) = HeaderValue::from_str(&id) {
                            response.headers_mut().insert(REQUEST_ID_HEADER, value);
                        }
                    }
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}

/// Request ID supplied by the caller in `X-Request-ID`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// The id as sent by the caller
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the id
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
