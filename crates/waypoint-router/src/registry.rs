//! Handler registry: resolves dispatch identifiers to concrete handlers.
//!
//! Controllers and actions travel through the router as opaque strings. The
//! registry is the explicit lookup table, populated once at startup, that
//! turns a resolved [`Dispatch`] into something invocable. No reflection,
//! no global state.

use std::collections::HashMap;

use waypoint_core::{WaypointError, WaypointResult};

use crate::dispatch::Dispatch;

/// A registry mapping controller/action identifier pairs to handlers.
///
/// The handler type is chosen by the owning application, typically a boxed
/// constructor or function. Registration happens during startup; lookups
/// are read-only afterwards.
///
/// # Examples
///
/// ```
/// use waypoint_router::registry::HandlerRegistry;
///
/// let mut registry: HandlerRegistry<fn() -> &'static str> = HandlerRegistry::new();
/// registry.register("App::Blog::PostController", "showAction", || "post");
///
/// let handler = registry.get("App::Blog::PostController", "showAction").unwrap();
/// assert_eq!(handler(), "post");
/// ```
pub struct HandlerRegistry<H> {
    handlers: HashMap<String, H>,
}

impl<H> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HandlerRegistry<H> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler for a controller/action pair.
    ///
    /// # Panics
    ///
    /// Panics if the pair is already registered.
    pub fn register(&mut self, controller: &str, action: &str, handler: H) {
        let id = format!("{controller}::{action}");
        assert!(
            !self.handlers.contains_key(&id),
            "Handler '{id}' is already registered"
        );
        self.handlers.insert(id, handler);
    }

    /// Returns the handler for a controller/action pair, if registered.
    pub fn get(&self, controller: &str, action: &str) -> Option<&H> {
        self.handlers.get(&format!("{controller}::{action}"))
    }

    /// Looks up the handler for a resolved dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::HandlerNotFound`] when nothing is registered
    /// for the dispatch identity. Mapping that onto a 404 or 500 response
    /// is the caller's decision, not the router's.
    pub fn resolve(&self, dispatch: &Dispatch) -> WaypointResult<&H> {
        let id = dispatch.handler_id();
        self.handlers
            .get(&id)
            .ok_or(WaypointError::HandlerNotFound(id))
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
