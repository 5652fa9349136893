//! Index page templating via `minijinja`.
//!
//! The index document embeds the initial scene markup, the client-side
//! input and visibility scripts, and the `WebSocket` wiring that keeps the
//! scene in sync. The template and scripts are compiled into the binary so
//! the server has no runtime file dependencies; the rendering context is
//! the merge of static template data and the dynamic fields (socket route
//! name, listen address) supplied at startup.

use minijinja::Environment;
use serde::Serialize;

use crate::error::WebError;

/// Ingress route name for mouse button events.
pub const ROUTE_MOUSE_BUTTON: &str = "on_mouse_button";

/// Ingress route name for mouse motion events.
pub const ROUTE_MOUSE_MOTION: &str = "on_mouse_motion";

/// Ingress route name for page visibility changes.
pub const ROUTE_VISIBILITY: &str = "on_visibility_change";

/// Scene markup shown until the first payload arrives over the socket.
pub const DEFAULT_SVG_CODE: &str =
    r#"<svg id="root" xmlns="http://www.w3.org/2000/svg"></svg>"#;

/// The embedded index template.
///
/// Registered under a name without an `.html` suffix so minijinja leaves
/// the scene markup and scripts unescaped.
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html.j2");

/// Client-side pointer capture script, inlined into the page.
const INPUT_SCRIPT: &str = include_str!("../static/handle_input.js");

/// Client-side visibility reporting script, inlined into the page.
const VISIBILITY_SCRIPT: &str = include_str!("../static/handle_visibility.js");

/// Dynamic fields merged into the index template context.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    /// Document title.
    pub title: String,
    /// `host:port` the socket client connects back to.
    pub address: String,
    /// Channel route name the scene stream is served on.
    pub scene_route: String,
    /// Initial scene markup.
    pub svg_code: String,
}

impl PageContext {
    /// Create a context for the given listen address and scene route,
    /// with the default title and initial markup.
    pub fn new(address: impl Into<String>, scene_route: impl Into<String>) -> Self {
        Self {
            title: String::from("Vitrine"),
            address: address.into(),
            scene_route: scene_route.into(),
            svg_code: String::from(DEFAULT_SVG_CODE),
        }
    }
}

/// Manages index page template loading and rendering.
///
/// Wraps a `minijinja` [`Environment`] with the embedded template
/// pre-loaded.
#[derive(Debug)]
pub struct PageEngine {
    env: Environment<'static>,
}

impl PageEngine {
    /// Create a page engine with the embedded index template loaded.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Template`] if the embedded template fails to
    /// parse.
    pub fn new() -> Result<Self, WebError> {
        let mut env = Environment::new();
        env.add_template("index", INDEX_TEMPLATE)
            .map_err(|e| WebError::Template(format!("failed to add index template: {e}")))?;
        Ok(Self { env })
    }

    /// Render the index document for the given context.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Template`] when rendering fails.
    pub fn render_index(&self, ctx: &PageContext) -> Result<String, WebError> {
        self.env
            .get_template("index")
            .map_err(|e| WebError::Template(format!("missing index template: {e}")))?
            .render(minijinja::context! {
                title => ctx.title,
                address => ctx.address,
                scene_route => ctx.scene_route,
                svg_code => ctx.svg_code,
                on_mouse_button => ROUTE_MOUSE_BUTTON,
                on_mouse_motion => ROUTE_MOUSE_MOTION,
                on_visibility_change => ROUTE_VISIBILITY,
                handle_input => INPUT_SCRIPT,
                handle_visibility => VISIBILITY_SCRIPT,
            })
            .map_err(|e| WebError::Template(format!("index render failed: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn index_renders_with_dynamic_context() {
        let engine = PageEngine::new().unwrap();
        let ctx = PageContext::new("127.0.0.1:8888", "scene");
        let html = engine.render_index(&ctx).unwrap();

        assert!(html.contains("ws://127.0.0.1:8888/scene"));
        assert!(html.contains(DEFAULT_SVG_CODE));
        assert!(html.contains(ROUTE_MOUSE_BUTTON));
        assert!(html.contains(ROUTE_MOUSE_MOTION));
        assert!(html.contains(ROUTE_VISIBILITY));
    }

    #[test]
    fn index_inlines_client_scripts() {
        let engine = PageEngine::new().unwrap();
        let html = engine
            .render_index(&PageContext::new("localhost:1", "scene"))
            .unwrap();

        // The capture scripts are served inline, not as separate assets.
        assert!(html.contains("pushInputEvent"));
        assert!(html.contains("visibilitychange"));
    }
}
