//! Faultline HTTP Server
//!
//! Main entry point for the fault-injection backend.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use application::{
    DataService, DependencyProbePort, FaultDecider, RequestCounters, SimulationService,
};
use infrastructure::{
    AppConfig, FaultInjectorConfig, PostgresProbe, ProbabilisticFaultInjector, build_event_sink,
    init_logging,
};
use presentation_http::{
    ShutdownOutcome, routes, serve, set_expose_internal_errors, state::AppState,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration first: it carries the log filter and format
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.telemetry)?;

    info!("Faultline backend v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        error_rate = %config.simulation.error_rate,
        log_collector = %config.log_collector.log_endpoint(),
        "Configuration loaded"
    );

    set_expose_internal_errors(config.server.expose_internal_errors);

    // Adapters
    let probe = PostgresProbe::new(&config.database);
    info!(
        "Connecting to database at {}:{}",
        config.database.host, config.database.port
    );
    let probe: Arc<dyn DependencyProbePort> = Arc::new(probe);

    let injector = ProbabilisticFaultInjector::new(FaultInjectorConfig::from(&config.simulation))
        .map_err(|e| anyhow::anyhow!("Failed to initialize fault injector: {e}"))?;
    let faults: Arc<dyn FaultDecider> = Arc::new(injector);

    let events = build_event_sink(&config.log_collector);

    // Services
    let counters = Arc::new(RequestCounters::new());
    let data_service = DataService::new(
        Arc::clone(&counters),
        faults,
        Arc::clone(&probe),
        Arc::clone(&events),
    );
    let simulation = SimulationService::new(
        Arc::clone(&counters),
        events,
        config.simulation.to_settings(),
    );

    let state = AppState {
        data_service: Arc::new(data_service),
        simulation: Arc::new(simulation),
        counters,
        probe,
        started_at: Instant::now(),
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    };

    // Add middleware (order matters: last added = outermost)
    let app = app.layer(cors_layer).layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("API docs: http://{}/api-docs/openapi.json", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    match serve(listener, app, shutdown_signal(), shutdown_timeout).await? {
        ShutdownOutcome::Drained => info!("Server shutdown complete"),
        ShutdownOutcome::TimedOut => warn!("Server shutdown forced after {:?}", shutdown_timeout),
    }

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
