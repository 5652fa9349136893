//! Event buffering, channel multiplexing, and relay orchestration for the
//! Vitrine browser relay.
//!
//! This crate is the transport-free core of the relay: it owns the bounded
//! inbound event buffer, the per-route outbound channels, and the
//! [`RelayService`] facade that a transport layer (see `vitrine-web`) binds
//! HTTP routes to. Nothing here knows about axum or WebSockets; the
//! consumer side of a channel is abstracted behind [`PayloadSink`].
//!
//! # Modules
//!
//! - [`buffer`] -- Bounded FIFO of inbound browser events with atomic drain.
//! - [`channel`] -- Per-route last-value-wins handler with open/closed states.
//! - [`registry`] -- Route map enforcing a single live handler per route.
//! - [`relay`] -- The [`RelayService`] facade: ingress validation, buffering,
//!   and channel wrappers consumed by the avatar loop.
//! - [`config`] -- Typed configuration loaded from `vitrine-config.yaml`.
//! - [`error`] -- The unified [`RelayError`] taxonomy.
//!
//! [`RelayService`]: relay::RelayService
//! [`PayloadSink`]: channel::PayloadSink
//! [`RelayError`]: error::RelayError

pub mod buffer;
pub mod channel;
pub mod config;
pub mod error;
pub mod registry;
pub mod relay;

// Re-export primary types for convenience.
pub use buffer::{DEFAULT_EVENT_CAPACITY, EventBuffer};
pub use channel::{ChannelHandler, PayloadSink, SinkClosed};
pub use config::{ConfigError, VitrineConfig};
pub use error::RelayError;
pub use registry::ChannelRegistry;
pub use relay::{InputKind, RelayService};
