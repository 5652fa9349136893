//! Per-route outbound channel with last-value-wins delivery.
//!
//! A [`ChannelHandler`] holds the latest payload pushed by the simulation
//! loop and wakes the attached consumer when it changes. The slot is a
//! [`tokio::sync::watch`] channel -- a single-capacity mailbox carrying the
//! most recent value -- so intermediate payloads written between two
//! consumer wake-ups coalesce. This is an intentional last-value-wins
//! delivery policy, not exactly-once event delivery.
//!
//! The consumer side is abstracted behind [`PayloadSink`] so the core stays
//! transport-free; `vitrine-web` implements the trait for an axum
//! `WebSocket`, and tests implement it over an in-memory channel.

use std::future::Future;

use tokio::sync::watch;
use tracing::debug;

/// Error returned by a [`PayloadSink`] whose peer has gone away.
///
/// Sink-side disconnection is normal channel teardown, never a fault: the
/// consumer loop terminates cleanly and releases its resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("payload sink closed by peer")]
pub struct SinkClosed;

/// Destination for payloads delivered by a channel's consumer loop.
pub trait PayloadSink {
    /// Deliver one payload to the peer.
    ///
    /// # Errors
    ///
    /// Returns [`SinkClosed`] when the peer has disconnected; the consumer
    /// loop treats this as clean termination.
    fn deliver(&mut self, payload: String) -> impl Future<Output = Result<(), SinkClosed>> + Send;
}

/// The watched slot: latest payload plus the closed flag.
#[derive(Debug, Clone, Default)]
struct ChannelSlot {
    /// Most recent payload pushed via `update`, if any yet.
    payload: Option<String>,
    /// Once set, the handler accepts no further payloads.
    closed: bool,
}

/// Per-route state machine holding the latest outbound payload.
///
/// States are `Open` and `Closed`; a handler starts `Open` and
/// [`close`](Self::close) is the only transition. Once closed, a handler
/// never pushes further payloads and its consumer loop terminates.
#[derive(Debug)]
pub struct ChannelHandler {
    slot: watch::Sender<ChannelSlot>,
}

impl ChannelHandler {
    /// Create an open handler with no payload yet.
    pub fn new() -> Self {
        let (slot, _) = watch::channel(ChannelSlot::default());
        Self { slot }
    }

    /// Store `payload` as the latest value and wake the consumer.
    ///
    /// On a closed handler this is a silent no-op: reconnect replacement
    /// races make a late update from the simulation loop normal.
    pub fn update(&self, payload: impl Into<String>) {
        let payload = payload.into();
        let stored = self.slot.send_if_modified(|slot| {
            if slot.closed {
                false
            } else {
                slot.payload = Some(payload);
                true
            }
        });
        if !stored {
            debug!("update on closed channel ignored");
        }
    }

    /// Transition to `Closed`, waking any suspended consumer so its loop
    /// terminates. Idempotent.
    pub fn close(&self) {
        self.slot.send_if_modified(|slot| {
            if slot.closed {
                false
            } else {
                slot.closed = true;
                true
            }
        });
    }

    /// Whether the handler has been closed.
    pub fn is_closed(&self) -> bool {
        self.slot.borrow().closed
    }

    /// Run the consumer loop against `sink` until closed or disconnected.
    ///
    /// A payload stored before the consumer attached is delivered as the
    /// first message. After that the loop suspends until `update` or
    /// `close`; on wake-up only the current latest payload is written.
    /// Sink disconnection terminates the loop cleanly.
    pub async fn run<S: PayloadSink>(&self, sink: &mut S) {
        let mut rx = self.slot.subscribe();
        // A fresh receiver marks the current slot as seen; force one
        // initial observation so a pre-attach payload is delivered.
        rx.mark_changed();
        loop {
            if rx.changed().await.is_err() {
                // Handler dropped out from under the consumer.
                return;
            }
            let (payload, closed) = {
                let slot = rx.borrow_and_update();
                (slot.payload.clone(), slot.closed)
            };
            if closed {
                debug!("channel closed, releasing consumer");
                return;
            }
            if let Some(payload) = payload
                && sink.deliver(payload).await.is_err()
            {
                debug!("sink disconnected, releasing consumer");
                return;
            }
        }
    }
}

impl Default for ChannelHandler {
    fn default() -> Self {
        Self::new()
    }
}
