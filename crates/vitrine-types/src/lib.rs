//! Shared type definitions for the Vitrine browser relay.
//!
//! This crate is the single source of truth for the input event model that
//! crosses the browser boundary. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` so the browser client stays in sync with the
//! wire format.
//!
//! # Modules
//!
//! - [`enums`] -- Closed wire enumerations (button status, page visibility)
//! - [`events`] -- The input event union relayed from browser to simulation

pub mod enums;
pub mod events;

// Re-export all public types at crate root for convenience.
pub use enums::{ButtonStatus, InvalidValue, VisibilityState};
pub use events::{InputEvent, InputEventKind, Position};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::enums::ButtonStatus::export_all();
        let _ = crate::enums::VisibilityState::export_all();
        let _ = crate::events::Position::export_all();
        let _ = crate::events::InputEventKind::export_all();
        let _ = crate::events::InputEvent::export_all();
    }
}
