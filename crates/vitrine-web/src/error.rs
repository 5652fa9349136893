//! Error types for the web transport.
//!
//! [`WebError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. The
//! response body is always `{"error": <message>}` -- the shape the browser
//! client expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use vitrine_core::RelayError;

/// Errors that can occur in the web transport layer.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// A relay core failure (validation, buffer overflow, unknown route).
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// The index page template failed to load or render.
    #[error("template error: {0}")]
    Template(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Unknown routes are a usage error distinct from bad request
            // bodies; everything else mirrors the original surface and
            // reports 500.
            Self::Relay(RelayError::UnknownRoute(_)) => StatusCode::NOT_FOUND,
            Self::Relay(_) | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_internal_server_error() {
        let response =
            WebError::from(RelayError::Validation(String::from("missing field `id`")))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unknown_route_maps_to_not_found() {
        let response =
            WebError::from(RelayError::UnknownRoute(String::from("scene"))).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn buffer_full_maps_to_internal_server_error() {
        let response =
            WebError::from(RelayError::BufferFull { capacity: 10 }).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
