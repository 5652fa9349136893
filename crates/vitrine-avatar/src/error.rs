//! Error types for the avatar binary.
//!
//! Uses `thiserror` for typed errors covering every startup and runtime
//! failure the binary can surface: configuration loading, transport
//! state construction, server spawn, and relay faults from the cycle
//! loop.

use vitrine_core::{ConfigError, RelayError};
use vitrine_web::error::WebError;
use vitrine_web::startup::StartupError;

/// Errors that can occur while bootstrapping or running the avatar.
#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    /// Configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Transport state construction failed.
    #[error("web state error: {0}")]
    State(#[from] WebError),

    /// The relay server failed to spawn.
    #[error("startup error: {0}")]
    Startup(#[from] StartupError),

    /// A relay fault surfaced from the cycle loop.
    #[error("relay error: {0}")]
    Relay(#[from] RelayError),
}
