//! `WebSocket` handler for per-route scene streaming.
//!
//! Clients connect to `GET /{route_id}` and receive a text frame each time
//! the corresponding channel's latest payload changes. The socket is the
//! consumer sink for the channel handler's run loop: the connection lives
//! until the handler is closed (route reopened or relay shut down) or the
//! client disconnects. A disconnect is normal teardown, logged at debug.

use std::future::Future;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{FromRequestParts, Path, Request, State, WebSocketUpgrade};
use axum::response::{IntoResponse, Response};
use tracing::debug;
use vitrine_core::{PayloadSink, RelayError, SinkClosed};

use crate::error::WebError;
use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming the route's channel.
///
/// # Route
///
/// `GET /{route_id}`
///
/// Route existence is checked before the upgrade negotiation so an
/// unknown route surfaces as a plain `404` rather than a half-open
/// socket.
pub async fn channel_socket(
    Path(route_id): Path<String>,
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Response {
    if !state.relay.channel_exists(&route_id) {
        return WebError::from(RelayError::UnknownRoute(route_id)).into_response();
    }

    let (mut parts, _body) = request.into_parts();
    match WebSocketUpgrade::from_request_parts(&mut parts, &()).await {
        Ok(ws) => ws.on_upgrade(move |socket| stream_channel(socket, state, route_id)),
        Err(rejection) => rejection.into_response(),
    }
}

/// Drive the channel's consumer loop over the socket until it releases.
async fn stream_channel(socket: WebSocket, state: Arc<AppState>, route_id: String) {
    debug!(route = %route_id, "stream client connected");

    let mut sink = WsSink { socket };
    match state.relay.serve_channel(&route_id, &mut sink).await {
        Ok(()) => debug!(route = %route_id, "stream client released"),
        // The handler was replaced between the existence check and the
        // attach; nothing to stream.
        Err(e) => debug!(route = %route_id, error = %e, "stream attach failed"),
    }
}

/// [`PayloadSink`] over an axum `WebSocket`.
///
/// A failed send means the peer went away; the consumer loop treats that
/// as clean termination.
struct WsSink {
    socket: WebSocket,
}

impl PayloadSink for WsSink {
    fn deliver(&mut self, payload: String) -> impl Future<Output = Result<(), SinkClosed>> + Send {
        async move {
            self.socket
                .send(Message::Text(payload.into()))
                .await
                .map_err(|_| SinkClosed)
        }
    }
}
