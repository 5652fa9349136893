//! HTTP endpoint handlers for the web transport.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Index page (scene viewer) |
//! | `POST` | `/on_mouse_button` | Relay a mouse button transition |
//! | `POST` | `/on_mouse_motion` | Relay a pointer movement |
//! | `POST` | `/on_visibility_change` | Relay a page visibility change |
//!
//! Ingress bodies are read as raw bytes and parsed as loosely-typed JSON
//! here, so every malformed body -- unparseable JSON included -- surfaces
//! through the relay's validation taxonomy as a `{"error": ...}` response
//! rather than a framework rejection. Successful submissions answer with
//! the empty JSON object.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use serde_json::Value;
use vitrine_core::{InputKind, RelayError};

use crate::error::WebError;
use crate::state::AppState;

/// Serve the index page.
///
/// Rendering merges the static template data with the dynamic socket
/// route and address supplied at startup.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    Ok(Html(state.page.render_index(&state.page_context)?))
}

/// Relay a mouse button transition.
pub async fn on_mouse_button(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, WebError> {
    submit(&state, InputKind::MouseButton, &body)
}

/// Relay a pointer movement.
pub async fn on_mouse_motion(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, WebError> {
    submit(&state, InputKind::MouseMotion, &body)
}

/// Relay a page visibility change.
pub async fn on_visibility_change(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, WebError> {
    submit(&state, InputKind::Visibility, &body)
}

/// Parse the raw body and hand it to the relay ingress boundary.
fn submit(state: &AppState, kind: InputKind, body: &Bytes) -> Result<Json<Value>, WebError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RelayError::Validation(format!("invalid JSON body: {e}")))?;
    state.relay.submit(kind, &value)?;
    Ok(Json(serde_json::json!({})))
}
