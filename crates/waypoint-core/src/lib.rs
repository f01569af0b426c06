//! # waypoint-core
//!
//! Core types, settings, logging, and error types for the waypoint routing
//! engine. This crate has zero internal dependencies and provides the
//! foundation for the other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result alias
//! - [`settings`] - Statically-typed configuration model
//! - [`settings_loader`] - TOML/JSON/environment configuration loading
//! - [`logging`] - Tracing-based logging integration
//! - [`text`] - Small text helpers

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod text;

// Re-export the most commonly used types at the crate root.
pub use error::{WaypointError, WaypointResult};
pub use settings::{Defaults, RouterConfig, RuleDecl, Settings};
