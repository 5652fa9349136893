//! Axum router construction for the web transport.
//!
//! Assembles all routes (index, ingress `POST`s, `WebSocket` streaming)
//! into a single [`Router`] with CORS middleware enabled for development
//! access from other origins.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::page::{ROUTE_MOUSE_BUTTON, ROUTE_MOUSE_MOTION, ROUTE_VISIBILITY};
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the relay transport.
///
/// The router includes:
/// - `GET /` -- index page (scene viewer)
/// - `POST /on_mouse_button` -- mouse button ingress
/// - `POST /on_mouse_motion` -- pointer motion ingress
/// - `POST /on_visibility_change` -- visibility ingress
/// - `GET /{route_id}` -- `WebSocket` scene stream
///
/// Static ingress paths take precedence over the `{route_id}` capture, so
/// a channel route can never shadow an ingress endpoint. CORS is
/// configured to allow any origin for development.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Index page
        .route("/", get(handlers::index))
        // Ingress
        .route(
            &format!("/{ROUTE_MOUSE_BUTTON}"),
            post(handlers::on_mouse_button),
        )
        .route(
            &format!("/{ROUTE_MOUSE_MOTION}"),
            post(handlers::on_mouse_motion),
        )
        .route(
            &format!("/{ROUTE_VISIBILITY}"),
            post(handlers::on_visibility_change),
        )
        // Streaming
        .route("/{route_id}", get(ws::channel_socket))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
