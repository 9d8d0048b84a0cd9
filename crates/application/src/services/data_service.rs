//! Data retrieval use case
//!
//! Counts the attempt, gives the fault injector one chance to fail the
//! request, then probes the external store. Every outcome is reported to the
//! event sink; none of them is retried.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::LogRecord;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{DependencyProbePort, EventSink, FaultDecider, ProbeError};
use crate::request_context::RequestContext;

use super::RequestCounters;

/// Result of a successful probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    /// Scalar returned by the introspection query
    pub table_count: i64,
    /// When the count was read
    pub retrieved_at: DateTime<Utc>,
}

impl TableSnapshot {
    /// Message reported alongside the count
    pub const MESSAGE: &'static str = "Data retrieved successfully";
}

/// Orchestrates the fault injector, the dependency probe and the counters
pub struct DataService {
    counters: Arc<RequestCounters>,
    faults: Arc<dyn FaultDecider>,
    probe: Arc<dyn DependencyProbePort>,
    events: Arc<dyn EventSink>,
}

impl fmt::Debug for DataService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataService")
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl DataService {
    /// Create the service from its collaborators
    pub fn new(
        counters: Arc<RequestCounters>,
        faults: Arc<dyn FaultDecider>,
        probe: Arc<dyn DependencyProbePort>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            counters,
            faults,
            probe,
            events,
        }
    }

    /// Count the attempt and resolve the correlation id
    ///
    /// Must be called once per request, before [`Self::fetch`]; the attempt
    /// is counted whatever the outcome turns out to be.
    pub fn begin(&self, inbound_request_id: Option<String>) -> RequestContext {
        let sequence = self.counters.record_attempt();
        RequestContext::resolve(inbound_request_id, sequence)
    }

    /// Run the request: maybe inject a failure, otherwise probe the store
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn fetch(&self, ctx: &RequestContext) -> Result<TableSnapshot, ApplicationError> {
        if self.faults.decide() {
            self.counters.record_error();
            warn!("Injecting synthetic failure");
            self.emit(
                ctx,
                LogRecord::error(format!(
                    "Intentional error generated for request {}",
                    ctx.request_id()
                )),
            );
            return Err(ApplicationError::SyntheticFailure);
        }

        match self.probe.count_tables().await {
            Ok(table_count) => {
                debug!(table_count, "Dependency probe succeeded");
                self.emit(
                    ctx,
                    LogRecord::info(format!(
                        "Successfully processed request {}",
                        ctx.request_id()
                    )),
                );
                Ok(TableSnapshot {
                    table_count,
                    retrieved_at: Utc::now(),
                })
            },
            Err(ProbeError::Connection(detail)) => {
                self.counters.record_error();
                warn!(error = %detail, "Database connection failed");
                self.emit(
                    ctx,
                    LogRecord::error(format!(
                        "Database connection failed for request {}",
                        ctx.request_id()
                    )),
                );
                Err(ApplicationError::DependencyUnavailable(detail))
            },
            Err(ProbeError::Query(detail)) => {
                self.counters.record_error();
                warn!(error = %detail, "Database query failed");
                self.emit(ctx, LogRecord::error(format!("Database query failed: {detail}")));
                Err(ApplicationError::DependencyQuery(detail))
            },
        }
    }

    /// [`Self::begin`] followed by [`Self::fetch`]
    pub async fn handle(
        &self,
        inbound_request_id: Option<String>,
    ) -> (RequestContext, Result<TableSnapshot, ApplicationError>) {
        let ctx = self.begin(inbound_request_id);
        let result = self.fetch(&ctx).await;
        (ctx, result)
    }

    fn emit(&self, ctx: &RequestContext, record: LogRecord) {
        self.events
            .emit(record.with_correlation_id(ctx.request_id()));
    }
}
