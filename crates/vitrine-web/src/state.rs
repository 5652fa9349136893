//! Shared application state for the web transport.
//!
//! [`AppState`] holds the relay handle and the page engine. It is wrapped
//! in [`Arc`](std::sync::Arc) and injected into handlers via Axum's
//! `State` extractor. The transport owns no relay state of its own; the
//! relay is constructed by the embedding process and shared here by
//! handle.

use std::sync::Arc;

use vitrine_core::RelayService;

use crate::error::WebError;
use crate::page::{PageContext, PageEngine};

/// Shared state for the Axum application.
#[derive(Debug)]
pub struct AppState {
    /// Handle to the relay constructed by the embedding process.
    pub relay: Arc<RelayService>,

    /// Index page template engine.
    pub page: PageEngine,

    /// Static-plus-dynamic context merged into the index template.
    pub page_context: PageContext,
}

impl AppState {
    /// Create the application state.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Template`] if the embedded index template fails
    /// to parse.
    pub fn new(relay: Arc<RelayService>, page_context: PageContext) -> Result<Self, WebError> {
        Ok(Self {
            relay,
            page: PageEngine::new()?,
            page_context,
        })
    }
}
