//! The dispatch result contract.

use std::collections::HashMap;

/// The result of resolving a request path to a handler identity.
///
/// Carries opaque controller/action identifiers plus named arguments. The
/// owning application turns these into an invocable handler, typically via a
/// [`HandlerRegistry`](crate::registry::HandlerRegistry); the router itself
/// never instantiates anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Fully-qualified controller identifier (e.g. `App::Blog::PostController`).
    pub controller: String,
    /// Action identifier on the controller (e.g. `showAction`).
    pub action: String,
    /// Named arguments extracted from the path and rule configuration.
    pub args: HashMap<String, String>,
}

impl Dispatch {
    /// Returns the combined `controller::action` identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use waypoint_router::Dispatch;
    ///
    /// let dispatch = Dispatch {
    ///     controller: "App::Blog::PostController".to_string(),
    ///     action: "showAction".to_string(),
    ///     args: HashMap::new(),
    /// };
    /// assert_eq!(dispatch.handler_id(), "App::Blog::PostController::showAction");
    /// ```
    pub fn handler_id(&self) -> String {
        format!("{}::{}", self.controller, self.action)
    }
}
