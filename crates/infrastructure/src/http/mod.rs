//! Outbound HTTP
//!
//! The log forwarder posts structured records to the central collector,
//! carrying the request correlation id in the `X-Request-ID` header.

mod log_forwarder;

pub use log_forwarder::{HttpEventSink, LogForwardError, X_REQUEST_ID, build_event_sink};
