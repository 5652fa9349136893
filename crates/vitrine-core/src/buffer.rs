//! Bounded FIFO buffer for inbound browser events.
//!
//! Inbound HTTP handlers `put` concurrently; the simulation loop is the
//! single consumer and calls [`EventBuffer::drain_all`] once per cycle. The
//! queue behind a [`std::sync::Mutex`] is the single source of truth, and
//! the lock is held only for the atomic enqueue or drain -- never across a
//! suspension point.
//!
//! A write that would exceed capacity fails with
//! [`RelayError::BufferFull`]; overflow is a reportable condition, not
//! backpressure-via-blocking, and nothing is ever silently dropped.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use tracing::warn;
use vitrine_types::InputEvent;

use crate::error::RelayError;

/// Default capacity of the inbound event buffer.
pub const DEFAULT_EVENT_CAPACITY: usize = 10_000;

/// Bounded FIFO of [`InputEvent`]s.
///
/// Lives for the lifetime of the owning [`RelayService`](crate::relay::RelayService).
#[derive(Debug)]
pub struct EventBuffer {
    /// Maximum number of buffered events.
    capacity: usize,

    /// The buffered events, oldest first.
    queue: Mutex<VecDeque<InputEvent>>,
}

impl EventBuffer {
    /// Create a buffer with the given capacity.
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// The configured capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of currently buffered events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Append an event at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::BufferFull`] when the buffer is at capacity.
    /// The buffer contents are unchanged on failure.
    pub fn put(&self, event: InputEvent) -> Result<(), RelayError> {
        let mut queue = self.lock();
        if queue.len() >= self.capacity {
            return Err(RelayError::BufferFull {
                capacity: self.capacity,
            });
        }
        queue.push_back(event);
        Ok(())
    }

    /// Atomically remove and return every buffered event in FIFO order.
    ///
    /// Returns an empty vec when nothing is buffered. Designed for
    /// non-blocking single-consumer polling; a drain always observes a
    /// consistent snapshot -- no event is both drained and re-observable,
    /// and none is skipped.
    pub fn drain_all(&self) -> Vec<InputEvent> {
        let drained: Vec<InputEvent> = self.lock().drain(..).collect();
        if drained.len() == self.capacity {
            // The consumer only sees a full buffer when it is barely
            // keeping ahead of the producers; later writes were likely
            // rejected.
            warn!(
                capacity = self.capacity,
                "event buffer drained at capacity; consumer may be falling behind"
            );
        }
        drained
    }

    /// Lock the queue, recovering from a poisoned mutex.
    ///
    /// The queue holds plain data, so a panic in another thread cannot
    /// leave it in a torn state.
    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<InputEvent>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
