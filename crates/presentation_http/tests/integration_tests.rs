//! Integration tests for HTTP handlers
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::{
    collections::HashSet,
    sync::{
        Arc,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

use application::{
    DataService, DependencyProbePort, EventSink, FaultDecider, FixedFaultDecider, ProbeError,
    RecordingEventSink, RequestCounters, SimulationService, SimulationSettings,
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use domain::LogLevel;
use presentation_http::{routes::create_router, state::AppState};
use serde_json::Value;

const TIME_UNIT: Duration = Duration::from_millis(10);

/// Probe with a fixed outcome that counts how often it was called
struct StubProbe {
    outcome: Result<i64, ProbeError>,
    calls: AtomicUsize,
}

impl StubProbe {
    fn ok(count: i64) -> Self {
        Self {
            outcome: Ok(count),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(err: ProbeError) -> Self {
        Self {
            outcome: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DependencyProbePort for StubProbe {
    async fn count_tables(&self) -> Result<i64, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    async fn is_reachable(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Fails every other decision, starting with the first
#[derive(Default)]
struct AlternatingFaults(AtomicU64);

impl FaultDecider for AlternatingFaults {
    fn decide(&self) -> bool {
        self.0.fetch_add(1, Ordering::SeqCst) % 2 == 0
    }
}

struct Harness {
    server: TestServer,
    probe: Arc<StubProbe>,
    events: Arc<RecordingEventSink>,
}

fn harness_with(faults: Arc<dyn FaultDecider>, probe: StubProbe) -> Harness {
    let probe = Arc::new(probe);
    let events = Arc::new(RecordingEventSink::new());
    let counters = Arc::new(RequestCounters::new());

    let data_service = DataService::new(
        Arc::clone(&counters),
        faults,
        Arc::clone(&probe) as Arc<dyn DependencyProbePort>,
        Arc::clone(&events) as Arc<dyn EventSink>,
    );
    let simulation = SimulationService::new(
        Arc::clone(&counters),
        Arc::clone(&events) as Arc<dyn EventSink>,
        SimulationSettings {
            time_unit: TIME_UNIT,
            timeout_delay_units: 10,
            default_slow_delay_units: 3,
        },
    );

    let state = AppState {
        data_service: Arc::new(data_service),
        simulation: Arc::new(simulation),
        counters,
        probe: Arc::clone(&probe) as Arc<dyn DependencyProbePort>,
        started_at: Instant::now(),
    };

    let server = TestServer::new(create_router(state)).expect("Failed to create test server");
    Harness {
        server,
        probe,
        events,
    }
}

fn healthy_harness() -> Harness {
    harness_with(Arc::new(FixedFaultDecider::never()), StubProbe::ok(42))
}

fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

async fn metrics(server: &TestServer) -> Value {
    let response = server.get("/metrics").await;
    response.assert_status_ok();
    response.json()
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn health_endpoint_returns_healthy() {
    let h = healthy_harness();

    let response = h.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "backend");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn health_does_not_touch_database_or_counters() {
    let h = harness_with(
        Arc::new(FixedFaultDecider::never()),
        StubProbe::failing(ProbeError::Connection("refused".to_string())),
    );

    h.server.get("/health").await.assert_status_ok();

    assert_eq!(h.probe.calls(), 0);
    let body = metrics(&h.server).await;
    assert_eq!(body["totalRequests"], 0);
    assert_eq!(body["errorCount"], 0);
}

#[tokio::test]
async fn readiness_ok_when_database_reachable() {
    let h = healthy_harness();

    let response = h.server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["database"]["reachable"], true);
}

#[tokio::test]
async fn readiness_unavailable_when_database_unreachable() {
    let h = harness_with(
        Arc::new(FixedFaultDecider::never()),
        StubProbe::failing(ProbeError::Connection("refused".to_string())),
    );

    let response = h.server.get("/ready").await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["ready"], false);
    assert_eq!(metrics(&h.server).await["totalRequests"], 0);
}

// ============ Data Endpoint Tests ============

#[tokio::test]
async fn data_success_reports_table_count() {
    let h = healthy_harness();

    let response = h.server.get("/api/data").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["service"], "backend");
    assert_eq!(body["requestId"], "backend-1");
    assert_eq!(body["data"]["message"], "Data retrieved successfully");
    assert_eq!(body["data"]["tableCount"], 42);
    assert!(body["data"]["timestamp"].is_string());
    assert_eq!(response.header(request_id_header()), "backend-1");
}

#[tokio::test]
async fn data_success_emits_info_record() {
    let h = healthy_harness();

    h.server.get("/api/data").await.assert_status_ok();

    let records = h.events.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Info);
    assert_eq!(records[0].message, "Successfully processed request backend-1");
    assert_eq!(records[0].correlation_id.as_deref(), Some("backend-1"));
}

#[tokio::test]
async fn data_uses_inbound_request_id_verbatim() {
    let h = healthy_harness();

    let response = h
        .server
        .get("/api/data")
        .add_header(request_id_header(), HeaderValue::from_static("abc-123"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["requestId"], "abc-123");
    assert_eq!(response.header(request_id_header()), "abc-123");
}

#[tokio::test]
async fn data_keeps_non_ascii_request_id() {
    let h = healthy_harness();
    let id = "trace-\u{e9}";

    let response = h
        .server
        .get("/api/data")
        .add_header(
            request_id_header(),
            HeaderValue::from_bytes(id.as_bytes()).unwrap(),
        )
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["requestId"], id);
    assert_eq!(response.header(request_id_header()).as_bytes(), id.as_bytes());
    assert_eq!(h.events.records()[0].correlation_id.as_deref(), Some(id));
}

#[tokio::test]
async fn synthesized_id_follows_request_count() {
    let h = healthy_harness();

    h.server
        .get("/api/data")
        .add_header(request_id_header(), HeaderValue::from_static("external"))
        .await
        .assert_status_ok();
    let response = h.server.get("/api/data").await;

    let body: Value = response.json();
    assert_eq!(body["requestId"], "backend-2");
}

#[tokio::test]
async fn consecutive_successes_only_increase_total() {
    let h = healthy_harness();

    for _ in 0..5 {
        h.server.get("/api/data").await.assert_status_ok();
    }

    let body = metrics(&h.server).await;
    assert_eq!(body["totalRequests"], 5);
    assert_eq!(body["errorCount"], 0);
    assert!((body["successRate"].as_f64().unwrap() - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn injected_failure_skips_database() {
    let h = harness_with(Arc::new(FixedFaultDecider::always()), StubProbe::ok(42));

    let response = h
        .server
        .get("/api/data")
        .add_header(request_id_header(), HeaderValue::from_static("trace-7"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Intentional error for testing");
    assert_eq!(body["code"], "synthetic_error");
    assert_eq!(body["service"], "backend");
    assert_eq!(body["requestId"], "trace-7");
    assert_eq!(response.header(request_id_header()), "trace-7");

    assert_eq!(h.probe.calls(), 0);
    assert_eq!(h.events.count_level(LogLevel::Error), 1);
    assert_eq!(
        h.events.records()[0].message,
        "Intentional error generated for request trace-7"
    );

    let body = metrics(&h.server).await;
    assert_eq!(body["totalRequests"], 1);
    assert_eq!(body["errorCount"], 1);
}

#[tokio::test]
async fn connection_failure_is_service_unavailable() {
    let h = harness_with(
        Arc::new(FixedFaultDecider::never()),
        StubProbe::failing(ProbeError::Connection("connection refused".to_string())),
    );

    let response = h.server.get("/api/data").await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["error"], "Database connection failed");
    assert_eq!(body["code"], "database_unavailable");
    assert_eq!(body["requestId"], "backend-1");
    assert_eq!(
        h.events.records()[0].message,
        "Database connection failed for request backend-1"
    );

    let body = metrics(&h.server).await;
    assert_eq!(body["totalRequests"], 1);
    assert_eq!(body["errorCount"], 1);
    assert!(body["successRate"].as_f64().unwrap().abs() < 1e-9);
}

#[tokio::test]
async fn query_failure_reports_underlying_error() {
    let h = harness_with(
        Arc::new(FixedFaultDecider::never()),
        StubProbe::failing(ProbeError::Query("permission denied for schema".to_string())),
    );

    let response = h.server.get("/api/data").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "permission denied for schema");
    assert_eq!(body["code"], "database_query_failed");
    assert_eq!(
        h.events.records()[0].message,
        "Database query failed: permission denied for schema"
    );
    assert_eq!(metrics(&h.server).await["errorCount"], 1);
}

#[tokio::test]
async fn concurrent_requests_lose_no_updates() {
    let h = healthy_harness();

    let server = &h.server;
    let requests = (0..50).map(|_| async move { server.get("/api/data").await });
    let responses = futures::future::join_all(requests).await;

    let ids: HashSet<String> = responses
        .iter()
        .map(|r| {
            r.assert_status_ok();
            r.json::<Value>()["requestId"]
                .as_str()
                .unwrap()
                .to_string()
        })
        .collect();
    let expected: HashSet<String> = (1..=50).map(|n| format!("backend-{n}")).collect();
    assert_eq!(ids, expected);

    let body = metrics(&h.server).await;
    assert_eq!(body["totalRequests"], 50);
    assert_eq!(body["errorCount"], 0);
}

#[tokio::test]
async fn concurrent_mixed_outcomes_keep_invariant() {
    let h = harness_with(Arc::new(AlternatingFaults::default()), StubProbe::ok(1));

    let server = &h.server;
    let requests = (0..40).map(|_| async move { server.get("/api/data").await });
    futures::future::join_all(requests).await;

    let body = metrics(&h.server).await;
    assert_eq!(body["totalRequests"], 40);
    assert_eq!(body["errorCount"], 20);
    assert!((body["successRate"].as_f64().unwrap() - 50.0).abs() < 1e-9);
}

// ============ Slow Endpoint Tests ============

#[tokio::test]
async fn slow_waits_default_delay() {
    let h = healthy_harness();

    let started = Instant::now();
    let response = h.server.get("/api/slow").await;

    response.assert_status_ok();
    assert!(started.elapsed() >= TIME_UNIT * 3);
    let body: Value = response.json();
    assert_eq!(body["service"], "backend");
    assert_eq!(body["delay"], 3);
    assert_eq!(body["message"], "Slow response after 3 seconds");
}

#[tokio::test]
async fn slow_waits_requested_delay() {
    let h = healthy_harness();

    let started = Instant::now();
    let response = h.server.get("/api/slow").add_query_param("delay", 5).await;

    response.assert_status_ok();
    assert!(started.elapsed() >= TIME_UNIT * 5);
    assert_eq!(response.json::<Value>()["delay"], 5);
}

#[tokio::test]
async fn slow_with_zero_delay_responds_immediately() {
    let h = healthy_harness();

    let response = h.server.get("/api/slow").add_query_param("delay", 0).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["delay"], 0);
}

#[tokio::test]
async fn slow_rejects_malformed_delay() {
    let h = healthy_harness();

    for bad in ["abc", "-1", "1.5"] {
        let response = h.server.get("/api/slow").add_query_param("delay", bad).await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["code"], "bad_request");
        assert_eq!(body["service"], "backend");
    }
}

#[tokio::test]
async fn slow_rejection_carries_request_id() {
    let h = healthy_harness();

    let response = h
        .server
        .get("/api/slow")
        .add_query_param("delay", "abc")
        .add_header(request_id_header(), HeaderValue::from_static("trace-12"))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["requestId"], "trace-12");
    assert_eq!(response.header(request_id_header()), "trace-12");
}

#[tokio::test]
async fn slow_is_not_counted() {
    let h = healthy_harness();

    h.server
        .get("/api/slow")
        .add_query_param("delay", 0)
        .await
        .assert_status_ok();

    assert_eq!(metrics(&h.server).await["totalRequests"], 0);
}

// ============ Error Endpoint Tests ============

#[tokio::test]
async fn error_defaults_to_generic() {
    let h = healthy_harness();

    let response = h.server.get("/api/error").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Error type: generic");
    assert_eq!(body["code"], "simulated_error");
    assert_eq!(body["service"], "backend");
    assert!(body["timestamp"].is_string());
    assert_eq!(
        h.events.records()[0].message,
        "Error endpoint called with type: generic"
    );
}

#[tokio::test]
async fn error_without_request_id_omits_it() {
    let h = healthy_harness();

    let body: Value = h.server.get("/api/error").await.json();

    assert!(body.get("requestId").is_none());
    assert!(h.events.records()[0].correlation_id.is_none());
}

#[tokio::test]
async fn error_carries_inbound_request_id() {
    let h = healthy_harness();

    let response = h
        .server
        .get("/api/error")
        .add_header(request_id_header(), HeaderValue::from_static("trace-77"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["requestId"], "trace-77");
    assert_eq!(body["code"], "simulated_error");
    assert_eq!(response.header(request_id_header()), "trace-77");

    let records = h.events.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Error);
    assert_eq!(records[0].correlation_id.as_deref(), Some("trace-77"));
}

#[tokio::test]
async fn error_counts_attempt_and_error() {
    let h = healthy_harness();

    h.server.get("/api/error").await;
    h.server.get("/api/data").await.assert_status_ok();

    let body = metrics(&h.server).await;
    assert_eq!(body["totalRequests"], 2);
    assert_eq!(body["errorCount"], 1);
    assert!((body["successRate"].as_f64().unwrap() - 50.0).abs() < 1e-9);
}

#[tokio::test]
async fn error_timeout_blocks_before_responding() {
    let h = healthy_harness();

    let started = Instant::now();
    let response = h.server.get("/api/error").add_query_param("type", "timeout").await;

    assert!(started.elapsed() >= TIME_UNIT * 10);
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], "Error type: timeout");
}

#[tokio::test]
async fn error_other_types_respond_immediately() {
    let h = healthy_harness();

    let started = Instant::now();
    let response = h.server.get("/api/error").add_query_param("type", "database").await;

    assert!(started.elapsed() < TIME_UNIT * 10);
    assert_eq!(response.json::<Value>()["error"], "Error type: database");
}

// ============ Metrics Endpoint Tests ============

#[tokio::test]
async fn metrics_start_at_zero() {
    let h = healthy_harness();

    let body = metrics(&h.server).await;

    assert_eq!(body["service"], "backend");
    assert_eq!(body["totalRequests"], 0);
    assert_eq!(body["errorCount"], 0);
    assert_eq!(body["successRate"].as_f64(), Some(0.0));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn metrics_reads_are_idempotent() {
    let h = healthy_harness();
    h.server.get("/api/data").await.assert_status_ok();

    let first = metrics(&h.server).await;
    let second = metrics(&h.server).await;

    assert_eq!(first["totalRequests"], second["totalRequests"]);
    assert_eq!(first["errorCount"], second["errorCount"]);
}

#[tokio::test]
async fn prometheus_metrics_are_plain_text() {
    let h = harness_with(Arc::new(FixedFaultDecider::always()), StubProbe::ok(1));
    h.server.get("/api/data").await;

    let response = h.server.get("/metrics/prometheus").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("backend_requests_total 1"));
    assert!(text.contains("backend_errors_total 1"));
    assert!(text.contains("backend_success_rate 0.00"));
    assert!(text.contains("# TYPE backend_uptime_seconds counter"));
}

// ============ Documentation Tests ============

#[tokio::test]
async fn openapi_document_is_served() {
    let h = healthy_harness();

    let response = h.server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/api/data"].is_object());
    assert!(body["paths"]["/metrics"].is_object());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let h = healthy_harness();

    h.server.get("/api/unknown").await.assert_status_not_found();
}
