//! # waypoint
//!
//! A convention-over-configuration request routing and dispatch-resolution
//! engine. This is the meta-crate that re-exports the sub-crates; depend on
//! `waypoint` for everything, or on the individual crates for finer-grained
//! control.
//!
//! A [`Router`] is built once from declarative configuration. Per request,
//! `resolve(path, method)` walks the rules registered for the request's
//! method, then the wildcard rules, in declaration order; the first match
//! yields a [`Dispatch`] with controller/action identifiers and named
//! arguments. Paths no rule matches resolve by the
//! `/module/controller/action` convention, so routing always produces a
//! result.
//!
//! # Examples
//!
//! ```
//! use waypoint::core::settings_loader;
//! use waypoint::Router;
//!
//! let settings = settings_loader::from_toml_str(r#"
//!     [[router.rules]]
//!     pattern = '^post/(\d+)$'
//!     methods = ["GET"]
//!     controller = "App::Blog::PostController"
//!     action = "showAction"
//!
//!     [router.rules.maps]
//!     1 = "id"
//! "#).unwrap();
//!
//! let router = Router::new(settings.router).unwrap();
//!
//! let dispatch = router.resolve("post/42", "GET");
//! assert_eq!(dispatch.controller, "App::Blog::PostController");
//! assert_eq!(dispatch.args.get("id").unwrap(), "42");
//!
//! let dispatch = router.resolve("/blog/post/list", "GET");
//! assert_eq!(dispatch.controller, "App::Blog::PostController");
//! assert_eq!(dispatch.action, "listAction");
//! ```

/// Core types, settings, logging, and error types.
pub use waypoint_core as core;

/// Rule tables, path matching, convention resolution, and dispatch.
pub use waypoint_router as router;

pub use waypoint_core::{Defaults, RouterConfig, RuleDecl, Settings, WaypointError, WaypointResult};
pub use waypoint_router::{Dispatch, HandlerRegistry, Router};
