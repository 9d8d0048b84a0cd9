//! Request context for correlating responses and log records
//!
//! The correlation id is taken verbatim from the inbound `X-Request-ID`
//! header. When the caller sends none, one is synthesized from the request
//! counter value produced by this request's own increment.
//!
//! # Examples
//!
//! ```
//! use application::RequestContext;
//!
//! let ctx = RequestContext::from_header("trace-42");
//! assert_eq!(ctx.request_id(), "trace-42");
//!
//! let ctx = RequestContext::synthesized(7);
//! assert_eq!(ctx.request_id(), "backend-7");
//! ```

use chrono::{DateTime, Utc};
use domain::SERVICE_NAME;

/// Context for a single request
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    received_at: DateTime<Utc>,
    synthesized: bool,
}

impl RequestContext {
    /// Use an id supplied by the caller, unchanged
    #[must_use]
    pub fn from_header(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            received_at: Utc::now(),
            synthesized: false,
        }
    }

    /// Synthesize an id from the request sequence number
    #[must_use]
    pub fn synthesized(sequence: u64) -> Self {
        Self {
            request_id: format!("{SERVICE_NAME}-{sequence}"),
            received_at: Utc::now(),
            synthesized: true,
        }
    }

    /// Prefer the inbound id, otherwise synthesize one
    #[must_use]
    pub fn resolve(inbound: Option<String>, sequence: u64) -> Self {
        match inbound {
            Some(id) if !id.is_empty() => Self::from_header(id),
            _ => Self::synthesized(sequence),
        }
    }

    /// The correlation id
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// When the context was created
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Whether the id was generated here rather than supplied by the caller
    #[must_use]
    pub const fn is_synthesized(&self) -> bool {
        self.synthesized
    }
}
