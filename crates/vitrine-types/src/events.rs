//! The input event union relayed from the browser to the simulation loop.
//!
//! Events are immutable once constructed and carry no identity beyond
//! their creation order in the relay buffer. Construction stamps the
//! wall-clock time; all kind-specific payloads live in [`InputEventKind`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ButtonStatus, VisibilityState};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 2D coordinate pair in browser pixel space.
///
/// Used both for absolute pointer positions and for motion deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// Kind-specific payload of a browser input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum InputEventKind {
    /// A mouse button changed state.
    MouseButton {
        /// Button identifier (`left`, `middle`, `right`, `button{n}`).
        button: String,
        /// Pointer position at the time of the transition.
        position: Position,
        /// Whether the button was pressed or released.
        status: ButtonStatus,
    },

    /// The pointer moved.
    MouseMotion {
        /// Absolute pointer position.
        position: Position,
        /// Delta since the previous motion event.
        relative: Position,
    },

    /// The page visibility changed.
    Visibility {
        /// The new visibility state.
        state: VisibilityState,
    },
}

impl InputEventKind {
    /// Short name of the kind, used in log fields.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MouseButton { .. } => "mouse_button",
            Self::MouseMotion { .. } => "mouse_motion",
            Self::Visibility { .. } => "visibility",
        }
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// A single browser input event, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InputEvent {
    /// Wall-clock time at which the relay constructed the event.
    pub timestamp: DateTime<Utc>,
    /// Identifier of the document element the event targeted, if any.
    ///
    /// An empty `id` on the wire is normalized to `None` at ingress.
    pub target: Option<String>,
    /// Kind-specific payload.
    pub kind: InputEventKind,
}

impl InputEvent {
    /// Construct an event, stamping the current wall-clock time.
    pub fn new(kind: InputEventKind, target: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            target,
            kind,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn event_construction_stamps_time_and_target() {
        let event = InputEvent::new(
            InputEventKind::Visibility {
                state: VisibilityState::Hidden,
            },
            Some(String::from("root")),
        );
        assert_eq!(event.target.as_deref(), Some("root"));
        assert_eq!(event.kind.name(), "visibility");
    }

    #[test]
    fn kind_serializes_with_snake_case_tag() {
        let kind = InputEventKind::MouseButton {
            button: String::from("left"),
            position: Position::new(10.0, 20.0),
            status: ButtonStatus::Pressed,
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "mouse_button");
        assert_eq!(json["button"], "left");
        assert_eq!(json["position"]["x"], 10.0);
        assert_eq!(json["status"], "pressed");
    }

    #[test]
    fn event_round_trips_through_json() {
        let event = InputEvent::new(
            InputEventKind::MouseMotion {
                position: Position::new(1.5, 2.5),
                relative: Position::new(-1.0, 0.5),
            },
            None,
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: InputEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
