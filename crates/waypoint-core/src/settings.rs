//! Settings system for the waypoint engine.
//!
//! This module provides the statically-typed configuration model: [`Settings`]
//! holds the full engine configuration, [`RouterConfig`] the routing section,
//! [`RuleDecl`] a single declarative route rule, and [`Defaults`] the
//! convention template used when no rule matches. Every recognized option is
//! a named field, validated once at router construction.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// The convention template used when no explicit rule matches a path.
///
/// Convention resolution fills routing identity from path segments and falls
/// back to these values for anything the path does not supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Root namespace prepended to every derived controller identifier.
    pub namespace: String,
    /// Module used when the path supplies no first segment.
    pub module: String,
    /// Controller used when the path supplies no second segment.
    pub controller: String,
    /// Action used when the path supplies no third segment.
    pub action: String,
    /// Arguments attached to every convention-resolved dispatch.
    pub args: HashMap<String, String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            namespace: "App".to_string(),
            module: "Home".to_string(),
            controller: "IndexController".to_string(),
            action: "indexAction".to_string(),
            args: HashMap::new(),
        }
    }
}

/// A single declarative route rule.
///
/// Only `pattern` is required in configuration files; `methods` defaults to
/// the wildcard token and the remaining fields default to empty. A rule
/// missing its `controller` or `action` is rejected when the router is
/// built, not silently tolerated.
///
/// # Examples
///
/// ```
/// use waypoint_core::settings::RuleDecl;
///
/// let rule = RuleDecl::new(r"^post/(\d+)$", "App::Blog::PostController", "showAction")
///     .with_methods(&["GET"])
///     .map(1, "id")
///     .arg("format", "html");
///
/// assert_eq!(rule.methods, vec!["GET"]);
/// assert_eq!(rule.maps.get("1").unwrap(), "id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDecl {
    /// Regular expression matched against the request path. `^`/`$` anchors
    /// are added at compile time when absent, so rules match the full path.
    pub pattern: String,
    /// HTTP methods this rule applies to. `"*"` means any method and is
    /// consulted only after the request's concrete method.
    #[serde(default = "RuleDecl::any_method")]
    pub methods: Vec<String>,
    /// Fully-qualified controller identifier to dispatch to.
    #[serde(default)]
    pub controller: String,
    /// Action identifier to dispatch to.
    #[serde(default)]
    pub action: String,
    /// Capture-group position (1-based, written as a string key in
    /// configuration files) to argument name. Unmapped captures are
    /// discarded.
    #[serde(default)]
    pub maps: BTreeMap<String, String>,
    /// Static arguments merged into every dispatch this rule produces;
    /// captured values win on key collision.
    #[serde(default)]
    pub args: HashMap<String, String>,
}

impl RuleDecl {
    fn any_method() -> Vec<String> {
        vec!["*".to_string()]
    }

    /// Creates a rule for the given pattern, applying to any method.
    pub fn new(
        pattern: impl Into<String>,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            methods: Self::any_method(),
            controller: controller.into(),
            action: action.into(),
            maps: BTreeMap::new(),
            args: HashMap::new(),
        }
    }

    /// Restricts the rule to the given HTTP methods.
    #[must_use]
    pub fn with_methods(mut self, methods: &[&str]) -> Self {
        self.methods = methods.iter().map(ToString::to_string).collect();
        self
    }

    /// Maps a capture-group position to a named argument.
    #[must_use]
    pub fn map(mut self, position: u32, name: &str) -> Self {
        self.maps.insert(position.to_string(), name.to_string());
        self
    }

    /// Adds a static argument.
    #[must_use]
    pub fn arg(mut self, name: &str, value: &str) -> Self {
        self.args.insert(name.to_string(), value.to_string());
        self
    }
}

/// The routing section of the configuration: rules plus convention defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Route rules in declaration order; the earliest matching rule wins.
    pub rules: Vec<RuleDecl>,
    /// Convention template for paths no rule matches.
    pub defaults: Defaults,
}

/// The complete set of engine settings.
///
/// # Examples
///
/// ```
/// use waypoint_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.log_level, "info");
/// assert_eq!(settings.router.defaults.namespace, "App");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled.
    pub debug: bool,
    /// Log level filter (e.g. "info", "waypoint=debug").
    pub log_level: String,
    /// Routing configuration.
    pub router: RouterConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            router: RouterConfig::default(),
        }
    }
}
