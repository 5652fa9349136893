//! Route registry enforcing a single live channel handler per route.
//!
//! Opening a route that already has a handler closes the old one first --
//! its consumer loop observes the closed signal and terminates -- then
//! installs a fresh handler. This models reconnect-replaces-previous
//! semantics, not multiplexed fan-out: a browser reconnecting to the same
//! route takes the route over.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::channel::{ChannelHandler, PayloadSink};
use crate::error::RelayError;

/// Map from route identifier to its single live [`ChannelHandler`].
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    routes: Mutex<BTreeMap<String, Arc<ChannelHandler>>>,
}

impl ChannelRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            routes: Mutex::new(BTreeMap::new()),
        }
    }

    /// Open `route`, replacing and closing any existing handler for it.
    ///
    /// The returned handle is shared with the registry; the previous
    /// handler's consumer loop (if any) wakes on the closed signal and
    /// disconnects its stream.
    pub fn open(&self, route: &str) -> Arc<ChannelHandler> {
        let handler = Arc::new(ChannelHandler::new());
        let previous = self
            .lock()
            .insert(route.to_owned(), Arc::clone(&handler));
        if let Some(previous) = previous {
            previous.close();
            info!(route = %route, "channel route reopened, previous handler closed");
        } else {
            debug!(route = %route, "channel route opened");
        }
        handler
    }

    /// Push `payload` as the latest value for `route`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownRoute`] when no handler is registered
    /// for `route`.
    pub fn update(&self, route: &str, payload: impl Into<String>) -> Result<(), RelayError> {
        self.get(route)?.update(payload);
        Ok(())
    }

    /// Run the consumer loop for `route` against `sink` until the handler
    /// is closed or the sink disconnects.
    ///
    /// The registry lock is released before the loop runs; only the
    /// handler lookup is synchronized.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownRoute`] when no handler is registered
    /// for `route`.
    pub async fn attach<S: PayloadSink>(
        &self,
        route: &str,
        sink: &mut S,
    ) -> Result<(), RelayError> {
        let handler = self.get(route)?;
        handler.run(sink).await;
        Ok(())
    }

    /// Whether a handler is currently registered for `route`.
    pub fn contains(&self, route: &str) -> bool {
        self.lock().contains_key(route)
    }

    /// Number of registered routes.
    pub fn route_count(&self) -> usize {
        self.lock().len()
    }

    /// Close every handler and clear the registry.
    ///
    /// Used on service shutdown so all streaming connections release.
    pub fn close_all(&self) {
        let mut routes = self.lock();
        for handler in routes.values() {
            handler.close();
        }
        let closed = routes.len();
        routes.clear();
        if closed > 0 {
            info!(closed, "all channel routes closed");
        }
    }

    /// Look up the handler for `route`.
    fn get(&self, route: &str) -> Result<Arc<ChannelHandler>, RelayError> {
        self.lock()
            .get(route)
            .cloned()
            .ok_or_else(|| RelayError::UnknownRoute(route.to_owned()))
    }

    /// Lock the route map, recovering from a poisoned mutex.
    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Arc<ChannelHandler>>> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn open_registers_route() {
        let registry = ChannelRegistry::new();
        assert!(!registry.contains("scene"));

        let handler = registry.open("scene");
        assert!(registry.contains("scene"));
        assert!(!handler.is_closed());
    }

    #[test]
    fn reopen_closes_previous_handler_and_starts_fresh() {
        let registry = ChannelRegistry::new();
        let first = registry.open("scene");
        first.update("stale payload");

        let second = registry.open("scene");
        assert!(first.is_closed());
        assert!(!second.is_closed());
        assert_eq!(registry.route_count(), 1);
    }

    #[test]
    fn update_unknown_route_fails() {
        let registry = ChannelRegistry::new();
        let err = registry.update("nowhere", "payload").unwrap_err();
        assert_eq!(err, RelayError::UnknownRoute(String::from("nowhere")));
    }

    #[tokio::test]
    async fn attach_unknown_route_fails() {
        struct NoopSink;
        impl PayloadSink for NoopSink {
            fn deliver(
                &mut self,
                _payload: String,
            ) -> impl std::future::Future<Output = Result<(), crate::channel::SinkClosed>> + Send
            {
                async move { Ok(()) }
            }
        }

        let registry = ChannelRegistry::new();
        let mut sink = NoopSink;
        let err = registry.attach("nowhere", &mut sink).await.unwrap_err();
        assert_eq!(err, RelayError::UnknownRoute(String::from("nowhere")));
    }

    #[tokio::test]
    async fn reopen_terminates_attached_consumer() {
        use tokio::sync::mpsc;

        struct ForwardSink(mpsc::UnboundedSender<String>);
        impl PayloadSink for ForwardSink {
            fn deliver(
                &mut self,
                payload: String,
            ) -> impl std::future::Future<Output = Result<(), crate::channel::SinkClosed>> + Send
            {
                let result = self.0.send(payload).map_err(|_| crate::channel::SinkClosed);
                async move { result }
            }
        }

        let registry = Arc::new(ChannelRegistry::new());
        registry.open("scene");
        registry.update("scene", "first scene").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let consumer = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let mut sink = ForwardSink(tx);
                registry.attach("scene", &mut sink).await
            })
        };

        // The consumer is live and received the pre-attach payload.
        assert_eq!(rx.recv().await.as_deref(), Some("first scene"));

        // Reopening the route closes the first handler, which releases
        // the attached consumer; the fresh handler has no residue.
        let second = registry.open("scene");
        consumer.await.unwrap().unwrap();
        assert!(rx.recv().await.is_none());
        assert!(!second.is_closed());
    }

    #[test]
    fn close_all_closes_every_handler() {
        let registry = ChannelRegistry::new();
        let a = registry.open("a");
        let b = registry.open("b");

        registry.close_all();
        assert!(a.is_closed());
        assert!(b.is_closed());
        assert_eq!(registry.route_count(), 0);
    }
}
