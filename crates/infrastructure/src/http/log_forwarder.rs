//! Best-effort log forwarder
//!
//! Every record is sent in its own background task. Failures (collector
//! down, timeout, non-2xx) are logged locally and otherwise ignored, so
//! the request that produced the record is never delayed or failed by it.

use std::sync::Arc;
use std::time::Duration;

use application::ports::{EventSink, NoopEventSink};
use domain::LogRecord;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::LogCollectorConfig;

/// Header name for request correlation ID
pub const X_REQUEST_ID: &str = "x-request-id";

/// Why a single forwarding attempt failed
#[derive(Debug, Error)]
pub enum LogForwardError {
    /// Transport error or timeout
    #[error("log collector unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Collector answered with a non-success status
    #[error("log collector rejected record with status {0}")]
    Rejected(u16),
}

/// `EventSink` that POSTs records to `{base_url}/log`
#[derive(Debug, Clone)]
pub struct HttpEventSink {
    client: Client,
    endpoint: String,
}

impl HttpEventSink {
    /// Create a forwarder for the given collector
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client cannot be built.
    pub fn new(config: &LogCollectorConfig) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(format!("faultline/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.log_endpoint(),
        })
    }

    /// URL records are posted to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Deliver one record and wait for the collector's answer
    ///
    /// # Errors
    ///
    /// Returns `LogForwardError` if the request fails or is not accepted.
    #[instrument(skip(self, record), fields(level = %record.level))]
    pub async fn send(&self, record: &LogRecord) -> Result<(), LogForwardError> {
        let mut request = self.client.post(&self.endpoint).json(record);
        if let Some(id) = &record.correlation_id {
            request = request.header(X_REQUEST_ID, id);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LogForwardError::Rejected(status.as_u16()));
        }

        debug!("Log record forwarded");
        Ok(())
    }
}

impl EventSink for HttpEventSink {
    fn emit(&self, record: LogRecord) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(message = %record.message, "No async runtime, dropping log record");
            return;
        };

        let sink = self.clone();
        handle.spawn(async move {
            if let Err(e) = sink.send(&record).await {
                warn!(error = %e, endpoint = %sink.endpoint, "Failed to forward log record");
            }
        });
    }
}

/// Build the sink described by `config`
///
/// A disabled collector, or a client that cannot be built, yields a sink
/// that drops records.
pub fn build_event_sink(config: &LogCollectorConfig) -> Arc<dyn EventSink> {
    if !config.enabled {
        debug!("Log collector disabled");
        return Arc::new(NoopEventSink);
    }

    match HttpEventSink::new(config) {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            warn!(error = %e, "Failed to build log forwarder, records will be dropped");
            Arc::new(NoopEventSink)
        },
    }
}
