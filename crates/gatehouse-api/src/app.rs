//! Application builder and server runner.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{error, info, warn};

use gatehouse_auth::{SessionCleanup, Stores};
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::traits::SystemClock;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Gatehouse server until SIGINT or SIGTERM.
///
/// Shutdown sequence: readiness flips to draining, the drain delay elapses,
/// the listener closes, in-flight requests get the grace period to finish,
/// and finally the session reaper is stopped.
pub async fn run_server(config: AppConfig, stores: Stores) -> Result<(), AppError> {
    info!("Starting Gatehouse server...");

    let config = Arc::new(config);
    let state = AppState::new(Arc::clone(&config), stores, Arc::new(SystemClock))
        .map_err(|e| AppError::internal(format!("Failed to initialize services: {e}")))?;
    let readiness = state.readiness.clone();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let reaper = if config.session.cleanup_enabled {
        let minutes = config.session.cleanup_interval_minutes.max(1);
        let interval = Duration::from_secs(minutes.saturating_mul(60));
        let cleanup = SessionCleanup::new(Arc::clone(&state.session_manager), interval);
        Some(cleanup.spawn(shutdown_rx))
    } else {
        info!("Session cleanup disabled; expired sessions are removed on access only");
        None
    };

    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(address = %addr, "Gatehouse server listening");

    let drain_delay = Duration::from_secs(config.server.readiness_drain_seconds);
    let grace_period = Duration::from_secs(config.server.shutdown_grace_seconds);
    let (grace_tx, mut grace_rx) = watch::channel(false);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        readiness.mark_draining();
        info!(drain_secs = drain_delay.as_secs(), "Readiness set to draining");
        tokio::time::sleep(drain_delay).await;
        info!("No longer accepting connections");
        let _ = grace_tx.send(true);
    });

    let grace_expired = async move {
        let _ = grace_rx.wait_for(|started| *started).await;
        tokio::time::sleep(grace_period).await;
    };

    tokio::select! {
        result = server.into_future() => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = grace_expired => {
            warn!(
                grace_secs = grace_period.as_secs(),
                "Shutdown grace period elapsed; abandoning in-flight requests"
            );
        }
    }

    let _ = shutdown_tx.send(true);
    if let Some(handle) = reaper {
        if let Err(e) = handle.await {
            error!(error = %e, "Session cleanup task panicked");
        }
    }

    info!("Gatehouse server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
