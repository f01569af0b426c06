//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `WAYPOINT_DEBUG` | `debug` |
//! | `WAYPOINT_LOG_LEVEL` | `log_level` |
//! | `WAYPOINT_NAMESPACE` | `router.defaults.namespace` |
//! | `WAYPOINT_DEFAULT_MODULE` | `router.defaults.module` |
//! | `WAYPOINT_DEFAULT_CONTROLLER` | `router.defaults.controller` |
//! | `WAYPOINT_DEFAULT_ACTION` | `router.defaults.action` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use waypoint_core::settings_loader;
//!
//! // Load from TOML
//! let settings = settings_loader::from_toml_file("config/waypoint.toml").unwrap();
//!
//! // Load from TOML with environment overrides
//! let settings = settings_loader::from_toml_file_with_env("config/waypoint.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::WaypointError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// The TOML is deep-merged over the default settings, so any fields not
/// present in the file keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, WaypointError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| WaypointError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    let json_value = toml_to_json(toml_value);
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        WaypointError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, json_value);
    serde_json::from_value(merged).map_err(|e| {
        WaypointError::ConfigurationError(format!("Failed to deserialize settings from TOML: {e}"))
    })
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, WaypointError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        WaypointError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, WaypointError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, WaypointError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| WaypointError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        WaypointError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, json_value);
    serde_json::from_value(merged).map_err(|e| {
        WaypointError::ConfigurationError(format!("Failed to deserialize settings from JSON: {e}"))
    })
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, WaypointError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        WaypointError::ConfigurationError(format!(
            "Failed to read JSON file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_json_str(&content)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, WaypointError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Supported environment variables:
///
/// - `WAYPOINT_DEBUG` -> `debug` (values: "true"/"1"/"yes" => true, anything else => false)
/// - `WAYPOINT_LOG_LEVEL` -> `log_level`
/// - `WAYPOINT_NAMESPACE` -> `router.defaults.namespace`
/// - `WAYPOINT_DEFAULT_MODULE` -> `router.defaults.module`
/// - `WAYPOINT_DEFAULT_CONTROLLER` -> `router.defaults.controller`
/// - `WAYPOINT_DEFAULT_ACTION` -> `router.defaults.action`
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("WAYPOINT_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("WAYPOINT_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("WAYPOINT_NAMESPACE") {
        settings.router.defaults.namespace = val;
    }

    if let Ok(val) = std::env::var("WAYPOINT_DEFAULT_MODULE") {
        settings.router.defaults.module = val;
    }

    if let Ok(val) = std::env::var("WAYPOINT_DEFAULT_CONTROLLER") {
        settings.router.defaults.controller = val;
    }

    if let Ok(val) = std::env::var("WAYPOINT_DEFAULT_ACTION") {
        settings.router.defaults.action = val;
    }
}

// ============================================================
// Helpers
// ============================================================

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
