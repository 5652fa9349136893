//! Closed wire enumerations for browser input events.
//!
//! Every value the browser may send for an enum field is listed here.
//! Parsing from the wire string happens exactly once, at the relay ingress
//! boundary; internal code only ever sees the typed variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Error returned when a wire string does not name a valid enum value.
///
/// The message deliberately lists the accepted values so a browser-side
/// developer can read the failure straight out of the HTTP error body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value `{value}` for `{field}`, valid values include: [{expected}]")]
pub struct InvalidValue {
    /// The wire field being parsed.
    pub field: &'static str,
    /// The rejected wire value.
    pub value: String,
    /// Comma-separated list of accepted wire values.
    pub expected: &'static str,
}

// ---------------------------------------------------------------------------
// Button status
// ---------------------------------------------------------------------------

/// Whether a mouse button was pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ButtonStatus {
    /// The button transitioned from up to down.
    Pressed,
    /// The button transitioned from down to up.
    Released,
}

impl ButtonStatus {
    /// The wire string for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pressed => "pressed",
            Self::Released => "released",
        }
    }
}

impl fmt::Display for ButtonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ButtonStatus {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pressed" => Ok(Self::Pressed),
            "released" => Ok(Self::Released),
            other => Err(InvalidValue {
                field: "status",
                value: other.to_owned(),
                expected: "`pressed`, `released`",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Page visibility
// ---------------------------------------------------------------------------

/// Browser page visibility as reported by the Page Visibility API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum VisibilityState {
    /// The page is visible to the user.
    Visible,
    /// The page is hidden (tab switched, window minimized).
    Hidden,
}

impl VisibilityState {
    /// The wire string for this state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for VisibilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisibilityState {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visible" => Ok(Self::Visible),
            "hidden" => Ok(Self::Hidden),
            other => Err(InvalidValue {
                field: "visibility",
                value: other.to_owned(),
                expected: "`visible`, `hidden`",
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn button_status_parses_wire_strings() {
        assert_eq!("pressed".parse::<ButtonStatus>().unwrap(), ButtonStatus::Pressed);
        assert_eq!("released".parse::<ButtonStatus>().unwrap(), ButtonStatus::Released);
    }

    #[test]
    fn button_status_rejects_unknown_value() {
        let err = "clicked".parse::<ButtonStatus>().unwrap_err();
        assert_eq!(err.field, "status");
        assert!(err.to_string().contains("`clicked`"));
        assert!(err.to_string().contains("`pressed`"));
    }

    #[test]
    fn visibility_parses_wire_strings() {
        assert_eq!("visible".parse::<VisibilityState>().unwrap(), VisibilityState::Visible);
        assert_eq!("hidden".parse::<VisibilityState>().unwrap(), VisibilityState::Hidden);
    }

    #[test]
    fn visibility_rejects_unknown_value() {
        let err = "sideways".parse::<VisibilityState>().unwrap_err();
        assert!(err.to_string().contains("`sideways`"));
        assert!(err.to_string().contains("`visible`, `hidden`"));
    }

    #[test]
    fn serde_forms_are_lowercase() {
        assert_eq!(serde_json::to_string(&ButtonStatus::Pressed).unwrap(), "\"pressed\"");
        assert_eq!(serde_json::to_string(&VisibilityState::Hidden).unwrap(), "\"hidden\"");
    }
}
