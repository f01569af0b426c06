//! # waypoint-router
//!
//! Path routing and dispatch resolution:
//!
//! - [`rules`]: compiled route rules and the per-method rule table
//! - [`router`]: the [`Router`] and its `resolve(path, method)` entry point
//! - [`convention`]: `/module/controller/action` fallback resolution
//! - [`dispatch`]: the [`Dispatch`] result contract
//! - [`registry`]: mapping dispatch identifiers to concrete handlers
//!
//! A [`Router`] is built once from configuration and consulted per request.
//! Rules registered for the request's method are tried first, then wildcard
//! rules, each in declaration order; the first match wins. Paths no rule
//! matches fall back to convention resolution, so routing always produces a
//! [`Dispatch`].
//!
//! # Examples
//!
//! ```
//! use waypoint_core::settings::{RouterConfig, RuleDecl};
//! use waypoint_router::Router;
//!
//! let config = RouterConfig {
//!     rules: vec![
//!         RuleDecl::new(r"^post/(\d+)$", "App::Blog::PostController", "showAction")
//!             .with_methods(&["GET"])
//!             .map(1, "id"),
//!     ],
//!     ..RouterConfig::default()
//! };
//! let router = Router::new(config).unwrap();
//!
//! // Explicit rule
//! let dispatch = router.resolve("post/42", "GET");
//! assert_eq!(dispatch.controller, "App::Blog::PostController");
//! assert_eq!(dispatch.args.get("id").unwrap(), "42");
//!
//! // Convention fallback
//! let dispatch = router.resolve("/blog/post/show", "GET");
//! assert_eq!(dispatch.controller, "App::Blog::PostController");
//! assert_eq!(dispatch.action, "showAction");
//! ```

pub mod convention;
pub mod dispatch;
pub mod registry;
pub mod router;
pub mod rules;

pub use dispatch::Dispatch;
pub use registry::HandlerRegistry;
pub use router::Router;
pub use rules::{RouteRule, RuleTable};
