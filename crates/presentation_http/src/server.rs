//! Serving with a bounded graceful shutdown

use std::{
    future::{Future, IntoFuture},
    io,
    sync::Arc,
    time::Duration,
};

use axum::Router;
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

/// How the server stopped after the shutdown signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every open connection finished within the drain timeout
    Drained,
    /// The drain timeout elapsed with connections still open
    TimedOut,
}

/// Serve `app` until `signal` resolves, then give open connections at most
/// `drain_timeout` to finish
///
/// # Errors
///
/// Returns the listener's I/O error if serving fails.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    signal: impl Future<Output = ()> + Send + 'static,
    drain_timeout: Duration,
) -> io::Result<ShutdownOutcome> {
    let stopping = Arc::new(Notify::new());
    let notifier = Arc::clone(&stopping);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            info!("Waiting up to {:?} for connections to close...", drain_timeout);
            notifier.notify_one();
        })
        .into_future();

    tokio::select! {
        result = server => result.map(|()| ShutdownOutcome::Drained),
        () = async {
            stopping.notified().await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            warn!(?drain_timeout, "Connections still open after the drain timeout, closing them");
            Ok(ShutdownOutcome::TimedOut)
        }
    }
}
