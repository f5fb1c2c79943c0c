//! Handler for the `serve` command

use crate::api::{AppState, build_router};
use crate::cli::OutputFormatter;
use crate::config::Config;
use crate::error::{BookingError, Result};
use crate::storage::{MemoryStorage, spawn_sweeper};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// Start the HTTP server and block until Ctrl+C or SIGTERM
pub fn handle_serve_command(
    host: Option<String>,
    port: Option<u16>,
    config: &Config,
    output: &OutputFormatter,
) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    let address = server.bind_address();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(serve(config, &address, output))
        .map_err(|e| BookingError::custom(format!("{e:#}")))
}

async fn serve(config: &Config, address: &str, output: &OutputFormatter) -> anyhow::Result<()> {
    let storage = Arc::new(MemoryStorage::new(&config.engine));
    let sweeper = config
        .engine
        .sweep_interval()
        .map(|period| spawn_sweeper(storage.clone(), period));

    let app = build_router(AppState::from_storage(storage));
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    output.success(&format!("Listening on http://{address}/api/v1"));
    info!(%address, "HTTP server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    if let Some(sweeper) = sweeper {
        sweeper.shutdown().await;
    }
    info!("HTTP server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C"),
        () = terminate => info!("received SIGTERM"),
    }
}
