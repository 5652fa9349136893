//! Configuration loading and typed config structures for the Vitrine relay.
//!
//! The canonical configuration lives in `vitrine-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a default, so a missing file or an empty document yields
//! a fully usable configuration.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::buffer::DEFAULT_EVENT_CAPACITY;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level relay configuration.
///
/// Mirrors the structure of `vitrine-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VitrineConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ListenConfig,

    /// Relay core settings.
    #[serde(default)]
    pub relay: BufferConfig,

    /// Avatar loop settings.
    #[serde(default)]
    pub avatar: AvatarConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VitrineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listen address:
    /// - `VITRINE_HOST` overrides `server.host`
    /// - `VITRINE_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.server.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.server.apply_env_overrides();
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// The host address to bind to.
    pub host: String,

    /// The TCP port to listen on.
    pub port: u16,
}

impl ListenConfig {
    /// Apply `VITRINE_HOST` / `VITRINE_PORT` environment overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("VITRINE_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("VITRINE_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!(value = %port, "ignoring unparseable VITRINE_PORT"),
            }
        }
    }

    /// The `host:port` form used for binding and page templating.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8888,
        }
    }
}

/// Relay core settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Capacity of the inbound event buffer.
    pub event_buffer_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            event_buffer_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Avatar loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Name of the channel route the scene stream is served on.
    pub scene_route: String,

    /// Interval between avatar cycles in milliseconds.
    pub cycle_interval_ms: u64,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            scene_route: String::from("scene"),
            cycle_interval_ms: 100,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter level when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = VitrineConfig::parse("{}").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8888);
        assert_eq!(config.relay.event_buffer_capacity, DEFAULT_EVENT_CAPACITY);
        assert_eq!(config.avatar.scene_route, "scene");
        assert_eq!(config.avatar.cycle_interval_ms, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn yaml_values_override_defaults() {
        let yaml = r"
server:
  host: 0.0.0.0
  port: 9000
relay:
  event_buffer_capacity: 64
avatar:
  scene_route: world
  cycle_interval_ms: 250
logging:
  level: debug
";
        let config = VitrineConfig::parse(yaml).unwrap();
        assert_eq!(config.server.address(), "0.0.0.0:9000");
        assert_eq!(config.relay.event_buffer_capacity, 64);
        assert_eq!(config.avatar.scene_route, "world");
        assert_eq!(config.avatar.cycle_interval_ms, 250);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = VitrineConfig::parse("server:\n  port: 9999\n").unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.relay.event_buffer_capacity, DEFAULT_EVENT_CAPACITY);
    }

    #[test]
    fn invalid_yaml_is_a_yaml_error() {
        let err = VitrineConfig::parse("server: [not a map").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }
}
