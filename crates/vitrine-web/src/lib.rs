//! Axum HTTP + `WebSocket` transport for the Vitrine browser relay.
//!
//! This crate binds HTTP routes to an explicitly constructed
//! [`RelayService`](vitrine_core::RelayService) handle:
//!
//! - **`GET /`** -- the index page, rendered with `minijinja` from an
//!   embedded template plus a merged static/dynamic context
//! - **Ingress `POST` endpoints** (`/on_mouse_button`, `/on_mouse_motion`,
//!   `/on_visibility_change`) -- loosely-typed JSON bodies validated at the
//!   relay boundary and buffered for the simulation loop
//! - **`GET /{route_id}`** -- `WebSocket` upgrade streaming the route's
//!   channel; the socket is the consumer sink for the channel's run loop
//!
//! # Architecture
//!
//! The transport holds no relay state of its own. [`AppState`] wraps the
//! shared relay handle and the page engine, injected into handlers via
//! Axum's `State` extractor. Every failure is mapped to an HTTP response
//! in one place ([`error::WebError`]); a client disconnecting from a
//! stream is normal teardown, never an error.
//!
//! [`AppState`]: state::AppState

pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use page::{PageContext, PageEngine};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_server};
pub use state::AppState;
