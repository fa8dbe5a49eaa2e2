//! HTTP server initialization and runtime setup.
//!
//! Handles backend opening, worker spawning, and the Axum server lifecycle.

use crate::application::services::AuthService;
use crate::config::{Config, DatabaseConfig};
use crate::domain::repositories::StatsRepository;
use crate::domain::stat_worker::run_stat_worker;
use crate::infrastructure::persistence::open_backend;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (and its schema)
/// - Background stat worker
/// - Axum HTTP server
///
/// On Ctrl-C or SIGTERM the server stops accepting connections, in-flight
/// requests finish, the stat queue drains and the backend is closed.
///
/// # Errors
///
/// Returns an error if:
/// - The backend cannot be opened or migrated
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let backend = open_backend(&config.database.url, &config.database.pool)
        .await
        .context("Failed to open storage backend")?;

    backend
        .migrate()
        .await
        .context("Failed to create storage schema")?;

    let auth_service = AuthService::new(&config.auth_secret)?;

    let (stat_tx, stat_rx) = mpsc::channel(config.stats_queue_capacity);

    let stats_repository: Arc<dyn StatsRepository> = backend.clone();
    let worker = tokio::spawn(run_stat_worker(stat_rx, stats_repository));
    tracing::info!("Stat worker started");

    let state = AppState::new(backend.clone(), auth_service, stat_tx);

    let app = app_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, draining stat queue");
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "Stat worker panicked");
    }

    backend.close().await;
    tracing::info!("Storage closed");

    Ok(())
}

/// Creates the storage schema and exits.
///
/// # Errors
///
/// Returns an error if the backend cannot be opened or migrated.
pub async fn migrate(database: DatabaseConfig) -> Result<()> {
    let backend = open_backend(&database.url, &database.pool)
        .await
        .context("Failed to open storage backend")?;

    backend
        .migrate()
        .await
        .context("Failed to create storage schema")?;

    tracing::info!(backend = backend.backend_name(), "Schema is up to date");

    backend.close().await;
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::warn!("Shutdown signal received");
}
