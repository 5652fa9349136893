//! The [`RelayService`] facade tying the buffer and channel registry
//! together.
//!
//! The service is constructed once, owned by the process, and shared by
//! handle with whatever transport binds HTTP routes to it -- there are no
//! process-wide singletons. Inbound request bodies are loosely-typed JSON;
//! [`RelayService::submit`] is the single boundary where they are parsed
//! into the closed [`InputEvent`] variant set, so internal code never
//! re-checks shape.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};
use vitrine_types::{ButtonStatus, InputEvent, InputEventKind, Position, VisibilityState};

use crate::buffer::EventBuffer;
use crate::channel::{ChannelHandler, PayloadSink};
use crate::error::RelayError;
use crate::registry::ChannelRegistry;

/// The kind of inbound event a transport endpoint accepts.
///
/// Each HTTP ingress route maps to exactly one kind; the kind selects the
/// parse applied to the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `POST /on_mouse_button` bodies.
    MouseButton,
    /// `POST /on_mouse_motion` bodies.
    MouseMotion,
    /// `POST /on_visibility_change` bodies.
    Visibility,
}

/// The relay between a browser transport and the simulation loop.
///
/// Inbound: typed events buffered for the loop to drain once per cycle.
/// Outbound: named channels streaming the latest scene payload to
/// persistent connections.
#[derive(Debug)]
pub struct RelayService {
    buffer: EventBuffer,
    channels: ChannelRegistry,
}

impl RelayService {
    /// Create a relay with the given inbound event buffer capacity.
    pub const fn new(event_capacity: usize) -> Self {
        Self {
            buffer: EventBuffer::new(event_capacity),
            channels: ChannelRegistry::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Inbound: browser -> simulation
    // -----------------------------------------------------------------------

    /// Validate a raw request body and buffer the resulting typed event.
    ///
    /// This is the boundary between untrusted transport payloads and the
    /// typed domain. An empty `id` field is normalized to an absent
    /// target.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Validation`] for a missing field, a value of
    /// the wrong type, or an unrecognized enum value, and
    /// [`RelayError::BufferFull`] when the buffer rejects the write.
    pub fn submit(&self, kind: InputKind, body: &Value) -> Result<(), RelayError> {
        let event = match kind {
            InputKind::MouseButton => parse_mouse_button(body),
            InputKind::MouseMotion => parse_mouse_motion(body),
            InputKind::Visibility => parse_visibility(body),
        }?;
        debug!(kind = event.kind.name(), target = ?event.target, "event accepted");
        self.buffer.put(event).inspect_err(|e| {
            warn!(error = %e, "inbound event rejected");
        })
    }

    /// Drain every buffered event in FIFO order.
    ///
    /// Invoked by the simulation loop once per cycle.
    pub fn pull_events(&self) -> Vec<InputEvent> {
        self.buffer.drain_all()
    }

    // -----------------------------------------------------------------------
    // Outbound: simulation -> browser
    // -----------------------------------------------------------------------

    /// Open (or reopen, replacing the previous handler for) `route`.
    pub fn open_channel(&self, route: &str) -> Arc<ChannelHandler> {
        self.channels.open(route)
    }

    /// Push `payload` as the latest value for `route`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownRoute`] when `route` was never opened.
    pub fn push(&self, route: &str, payload: impl Into<String>) -> Result<(), RelayError> {
        self.channels.update(route, payload)
    }

    /// Serve `route`'s stream into `sink` until closed or disconnected.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownRoute`] when `route` was never opened.
    pub async fn serve_channel<S: PayloadSink>(
        &self,
        route: &str,
        sink: &mut S,
    ) -> Result<(), RelayError> {
        self.channels.attach(route, sink).await
    }

    /// Whether `route` currently has a live channel handler.
    ///
    /// The transport checks this before completing a connection upgrade so
    /// unknown routes are rejected with a plain HTTP status.
    pub fn channel_exists(&self, route: &str) -> bool {
        self.channels.contains(route)
    }

    /// Close every channel, releasing all streaming connections.
    pub fn shutdown(&self) {
        self.channels.close_all();
    }
}

impl Default for RelayService {
    fn default() -> Self {
        Self::new(crate::buffer::DEFAULT_EVENT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Ingress parsing
// ---------------------------------------------------------------------------

fn parse_mouse_button(body: &Value) -> Result<InputEvent, RelayError> {
    let position = require_position(body, "position")?;
    let button = require_str(body, "button")?.to_owned();
    let status: ButtonStatus = require_str(body, "status")?
        .parse()
        .map_err(validation)?;
    let target = optional_target(body)?;
    Ok(InputEvent::new(
        InputEventKind::MouseButton {
            button,
            position,
            status,
        },
        target,
    ))
}

fn parse_mouse_motion(body: &Value) -> Result<InputEvent, RelayError> {
    let position = require_position(body, "position")?;
    let relative = require_position(body, "relative")?;
    let target = optional_target(body)?;
    Ok(InputEvent::new(
        InputEventKind::MouseMotion { position, relative },
        target,
    ))
}

fn parse_visibility(body: &Value) -> Result<InputEvent, RelayError> {
    let state: VisibilityState = require_str(body, "visibility")?
        .parse()
        .map_err(validation)?;
    Ok(InputEvent::new(InputEventKind::Visibility { state }, None))
}

/// Wrap an enum parse failure in the validation variant.
fn validation(err: vitrine_types::InvalidValue) -> RelayError {
    RelayError::Validation(err.to_string())
}

/// Fetch a required field from the body object.
fn require<'a>(body: &'a Value, field: &'static str) -> Result<&'a Value, RelayError> {
    body.get(field)
        .ok_or_else(|| RelayError::Validation(format!("missing field `{field}`")))
}

/// Fetch a required string field.
fn require_str<'a>(body: &'a Value, field: &'static str) -> Result<&'a str, RelayError> {
    require(body, field)?
        .as_str()
        .ok_or_else(|| RelayError::Validation(format!("field `{field}` must be a string")))
}

/// Fetch a required `{x, y}` coordinate pair.
fn require_position(body: &Value, field: &'static str) -> Result<Position, RelayError> {
    let value = require(body, field)?;
    let coord = |axis: &str| {
        value.get(axis).and_then(Value::as_f64).ok_or_else(|| {
            RelayError::Validation(format!(
                "field `{field}` must be an object with numeric `x` and `y`"
            ))
        })
    };
    Ok(Position::new(coord("x")?, coord("y")?))
}

/// Fetch the required `id` field, normalizing empty to absent.
fn optional_target(body: &Value) -> Result<Option<String>, RelayError> {
    let id = require_str(body, "id")?;
    Ok((!id.is_empty()).then(|| id.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use vitrine_types::{ButtonStatus, InputEventKind, VisibilityState};

    use super::*;

    fn relay() -> RelayService {
        RelayService::new(16)
    }

    #[test]
    fn mouse_button_with_empty_id_yields_absent_target() {
        let relay = relay();
        let body = json!({
            "position": {"x": 10, "y": 20},
            "button": "left",
            "status": "pressed",
            "id": "",
        });
        relay.submit(InputKind::MouseButton, &body).unwrap();

        let events = relay.pull_events();
        assert_eq!(events.len(), 1);
        let event = events.into_iter().next().unwrap();
        assert_eq!(event.target, None);
        match event.kind {
            InputEventKind::MouseButton {
                button,
                position,
                status,
            } => {
                assert_eq!(button, "left");
                assert!((position.x - 10.0).abs() < f64::EPSILON);
                assert!((position.y - 20.0).abs() < f64::EPSILON);
                assert_eq!(status, ButtonStatus::Pressed);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn mouse_button_with_nonempty_id_keeps_target() {
        let relay = relay();
        let body = json!({
            "position": {"x": 0, "y": 0},
            "button": "right",
            "status": "released",
            "id": "circle-3",
        });
        relay.submit(InputKind::MouseButton, &body).unwrap();

        let event = relay.pull_events().into_iter().next().unwrap();
        assert_eq!(event.target.as_deref(), Some("circle-3"));
    }

    #[test]
    fn mouse_motion_parses_both_coordinate_pairs() {
        let relay = relay();
        let body = json!({
            "position": {"x": 5.5, "y": 6.5},
            "relative": {"x": -1, "y": 2},
            "id": "root",
        });
        relay.submit(InputKind::MouseMotion, &body).unwrap();

        let event = relay.pull_events().into_iter().next().unwrap();
        match event.kind {
            InputEventKind::MouseMotion { position, relative } => {
                assert!((position.x - 5.5).abs() < f64::EPSILON);
                assert!((relative.y - 2.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn visibility_parses_both_states() {
        let relay = relay();
        relay
            .submit(InputKind::Visibility, &json!({"visibility": "visible"}))
            .unwrap();
        relay
            .submit(InputKind::Visibility, &json!({"visibility": "hidden"}))
            .unwrap();

        let events = relay.pull_events();
        let states: Vec<_> = events
            .iter()
            .map(|e| match e.kind {
                InputEventKind::Visibility { state } => state,
                ref other => panic!("unexpected kind: {other:?}"),
            })
            .collect();
        assert_eq!(states, vec![VisibilityState::Visible, VisibilityState::Hidden]);
    }

    #[test]
    fn invalid_visibility_value_fails_and_leaves_buffer_unchanged() {
        let relay = relay();
        let err = relay
            .submit(InputKind::Visibility, &json!({"visibility": "sideways"}))
            .unwrap_err();

        match err {
            RelayError::Validation(msg) => {
                assert!(msg.contains("`sideways`"));
                assert!(msg.contains("`visible`, `hidden`"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(relay.pull_events().is_empty());
    }

    #[test]
    fn missing_field_is_a_validation_error() {
        let relay = relay();
        let err = relay
            .submit(
                InputKind::MouseButton,
                &json!({"button": "left", "status": "pressed", "id": ""}),
            )
            .unwrap_err();
        assert_eq!(
            err,
            RelayError::Validation(String::from("missing field `position`"))
        );
    }

    #[test]
    fn wrongly_typed_field_is_a_validation_error() {
        let relay = relay();
        let err = relay
            .submit(
                InputKind::MouseButton,
                &json!({
                    "position": {"x": 1, "y": 2},
                    "button": 0,
                    "status": "pressed",
                    "id": "",
                }),
            )
            .unwrap_err();
        assert_eq!(
            err,
            RelayError::Validation(String::from("field `button` must be a string"))
        );
    }

    #[test]
    fn buffer_overflow_propagates() {
        let relay = RelayService::new(1);
        let body = json!({"visibility": "visible"});
        relay.submit(InputKind::Visibility, &body).unwrap();

        let err = relay.submit(InputKind::Visibility, &body).unwrap_err();
        assert_eq!(err, RelayError::BufferFull { capacity: 1 });
        // The first event is still intact.
        assert_eq!(relay.pull_events().len(), 1);
    }

    #[test]
    fn push_to_unopened_route_fails() {
        let relay = relay();
        let err = relay.push("scene", "<svg/>").unwrap_err();
        assert_eq!(err, RelayError::UnknownRoute(String::from("scene")));
    }

    #[test]
    fn push_after_open_reaches_the_handler() {
        let relay = relay();
        let handler = relay.open_channel("scene");
        relay.push("scene", "<svg/>").unwrap();
        assert!(!handler.is_closed());
        assert!(relay.channel_exists("scene"));
    }

    #[test]
    fn shutdown_closes_open_channels() {
        let relay = relay();
        let handler = relay.open_channel("scene");
        relay.shutdown();
        assert!(handler.is_closed());
        assert!(!relay.channel_exists("scene"));
    }
}
