//! Core error types for the waypoint engine.
//!
//! This module provides [`WaypointError`], covering configuration errors,
//! handler-resolution errors, and I/O errors. Path resolution itself never
//! produces an error: an unmatched path degrades to convention defaults, and
//! a malformed rule pattern degrades to a non-matching rule.

use thiserror::Error;

/// The primary error type for the waypoint engine.
///
/// Construction-time problems are split in two: an unreadable or unparsable
/// configuration source is a [`ConfigurationError`](Self::ConfigurationError),
/// while a configuration that parsed but has an invalid shape (a rule without
/// a controller, a non-numeric capture position) is
/// [`ImproperlyConfigured`](Self::ImproperlyConfigured).
#[derive(Error, Debug)]
pub enum WaypointError {
    /// A configuration source could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The configuration parsed but its shape is invalid.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// No handler is registered for a resolved controller/action pair.
    ///
    /// Turning this into a 404 or 500 response is the caller's decision.
    #[error("No handler registered for '{0}'")]
    HandlerNotFound(String),

    /// An I/O error occurred while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience type alias for `Result<T, WaypointError>`.
pub type WaypointResult<T> = Result<T, WaypointError>;
