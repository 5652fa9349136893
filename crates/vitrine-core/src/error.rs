//! Error types for the relay core.
//!
//! [`RelayError`] unifies the three failure modes of the relay into a single
//! enum so the transport layer can map each to an HTTP response in one
//! place. Per-request failures are always isolated: a validation failure or
//! a full buffer never affects other in-flight requests or the buffer's
//! integrity.

/// Errors that can occur in the relay core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// An inbound request body was malformed: a missing field, a value of
    /// the wrong type, or an unrecognized enum value.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The inbound event buffer is at capacity.
    ///
    /// This means the simulation loop is not draining events fast enough.
    /// The write is rejected rather than blocking or evicting.
    #[error("event buffer full (capacity {capacity})")]
    BufferFull {
        /// The configured buffer capacity that was hit.
        capacity: usize,
    },

    /// A push or attach referenced a route that was never opened.
    ///
    /// This is a usage error on the collaborator side, surfaced distinctly
    /// from request validation failures.
    #[error("unknown channel route: {0}")]
    UnknownRoute(String),
}
