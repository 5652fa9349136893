//! Avatar binary for the Vitrine browser relay.
//!
//! This is the entry point that wires a stub scene sensor and a logging
//! actuator to the relay and its web transport. It loads configuration,
//! constructs the relay as an owned instance, opens the scene channel,
//! spawns the HTTP + `WebSocket` server on a background task, and runs
//! the avatar cycle loop until interrupted.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `vitrine-config.yaml` (or the path given
//!    as the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Construct the relay and open the scene channel
//! 4. Build the page context and transport state, spawn the server
//! 5. Run the avatar cycle loop until Ctrl-C
//! 6. Close all channels so streaming connections release

mod avatar;
mod error;
mod stub;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;
use vitrine_core::{RelayService, VitrineConfig};
use vitrine_web::{AppState, PageContext, ServerConfig, spawn_server};

use crate::avatar::Avatar;
use crate::error::AvatarError;
use crate::stub::{LoggingActuator, StubSvgSensor};

/// Default configuration file searched for next to the working directory.
const DEFAULT_CONFIG_PATH: &str = "vitrine-config.yaml";

/// Application entry point for the avatar.
///
/// # Errors
///
/// Returns an error if any initialization step or the cycle loop fails.
#[tokio::main]
async fn main() -> Result<(), AvatarError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!("vitrine-avatar starting");
    info!(
        address = %config.server.address(),
        scene_route = config.avatar.scene_route,
        event_buffer_capacity = config.relay.event_buffer_capacity,
        cycle_interval_ms = config.avatar.cycle_interval_ms,
        "Configuration loaded"
    );

    // 3. Construct the relay and open the scene channel.
    let relay = Arc::new(RelayService::new(config.relay.event_buffer_capacity));
    relay.open_channel(&config.avatar.scene_route);
    info!(route = config.avatar.scene_route, "Scene channel opened");

    // 4. Build the transport state and spawn the server.
    let context = PageContext::new(
        config.server.address(),
        config.avatar.scene_route.clone(),
    );
    let state = Arc::new(AppState::new(Arc::clone(&relay), context)?);
    let _server_handle = spawn_server(ServerConfig::from(&config.server), state).await?;
    info!("Relay server started");

    // 5. Run the avatar cycle loop until Ctrl-C.
    let mut avatar = Avatar::new(
        Arc::clone(&relay),
        config.avatar.scene_route.clone(),
        vec![Box::new(StubSvgSensor)],
        vec![Box::new(LoggingActuator)],
    );
    let interval = Duration::from_millis(config.avatar.cycle_interval_ms);

    tokio::select! {
        result = avatar.run(interval) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
        }
    }

    // 6. Close all channels so streaming connections release.
    relay.shutdown();
    info!("vitrine-avatar stopped");
    Ok(())
}

/// Load configuration from the path given on the command line, the
/// default file if present, or built-in defaults (plus environment
/// overrides) otherwise.
fn load_config() -> Result<VitrineConfig, AvatarError> {
    if let Some(path) = std::env::args().nth(1) {
        return Ok(VitrineConfig::from_file(Path::new(&path))?);
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(VitrineConfig::from_file(default_path)?)
    } else {
        // An empty document resolves to defaults and still applies
        // VITRINE_HOST / VITRINE_PORT overrides.
        Ok(VitrineConfig::parse("{}")?)
    }
}
