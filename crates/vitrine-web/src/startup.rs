//! Server startup helper for embedding next to a simulation loop.
//!
//! Provides [`spawn_server`] which launches the HTTP + `WebSocket`
//! transport on a background Tokio task. The avatar binary calls this
//! during startup so the transport runs concurrently with the cycle loop.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the relay server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the relay HTTP server on a background Tokio task.
///
/// Returns a [`JoinHandle`] so the caller can manage the server's
/// lifecycle alongside the simulation loop. The server runs until the
/// Tokio runtime is shut down or the task is aborted.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured address is not
/// parseable. Bind failures are detected inside the background task and
/// logged there.
pub async fn spawn_server(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    // Verify the address is parseable before spawning the background
    // task; obvious misconfigurations fail eagerly.
    let addr = format!("{}:{}", config.host, config.port);
    let _: std::net::SocketAddr = addr.parse().map_err(|e| {
        StartupError::Server(ServerError::Bind(format!("invalid address {addr}: {e}")))
    })?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state).await {
            tracing::error!(error = %e, "relay server exited with error");
        }
    });

    tracing::info!(address = %addr, "relay server spawned on background task");

    Ok(handle)
}
