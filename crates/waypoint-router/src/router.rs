//! The router: explicit rule matching with convention fallback.

use percent_encoding::percent_decode_str;

use waypoint_core::settings::RouterConfig;
use waypoint_core::WaypointResult;

use crate::convention;
use crate::dispatch::Dispatch;
use crate::rules::RuleTable;

/// The path-routing and dispatch-resolution engine.
///
/// A `Router` is built once from a [`RouterConfig`] and is immutable
/// afterwards: [`resolve`](Router::resolve) reads only the compiled rule
/// table and its own arguments, so a shared instance is safe to use from
/// concurrent request-handling tasks.
///
/// # Examples
///
/// ```
/// use waypoint_core::settings::{RouterConfig, RuleDecl};
/// use waypoint_router::Router;
///
/// let config = RouterConfig {
///     rules: vec![
///         RuleDecl::new(r"^post/(\d+)$", "App::Blog::PostController", "showAction")
///             .with_methods(&["GET"])
///             .map(1, "id"),
///     ],
///     ..RouterConfig::default()
/// };
///
/// let router = Router::new(config).unwrap();
/// let dispatch = router.resolve("post/42", "GET");
/// assert_eq!(dispatch.controller, "App::Blog::PostController");
/// assert_eq!(dispatch.action, "showAction");
/// assert_eq!(dispatch.args.get("id").unwrap(), "42");
/// ```
#[derive(Debug)]
pub struct Router {
    config: RouterConfig,
    table: RuleTable,
}

impl Router {
    /// Builds a router from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::ImproperlyConfigured`](waypoint_core::WaypointError::ImproperlyConfigured)
    /// if a rule is missing its controller or action, or maps a non-numeric
    /// capture position. A rule whose pattern is not a valid regex is not
    /// rejected here; it is reported and skipped when first evaluated.
    pub fn new(config: RouterConfig) -> WaypointResult<Self> {
        let table = RuleTable::build(&config.rules)?;
        Ok(Self { config, table })
    }

    /// Resolves a request path and method to a [`Dispatch`].
    ///
    /// Rules registered for the request's method are consulted first, then
    /// wildcard rules, each in declaration order; the first matching rule
    /// wins and no further rules are tried. Captured groups named in the
    /// rule's maps are percent-decoded and merged over the rule's static
    /// arguments. When no rule matches, identity is derived from the path
    /// by convention; an unmatched path is not an error.
    pub fn resolve(&self, path: &str, method: &str) -> Dispatch {
        let method = method.to_uppercase();

        for bucket in [method.as_str(), "*"] {
            for rule in self.table.bucket(bucket) {
                let Some(captures) = rule.captures(path) else {
                    continue;
                };

                let mut args = rule.args().clone();
                for (position, name) in rule.maps() {
                    // A group in an alternation branch that was not taken
                    // yields no capture; that argument is omitted.
                    if let Some(capture) = captures.get(*position) {
                        args.insert(name.clone(), urldecode(capture.as_str()));
                    }
                }

                return Dispatch {
                    controller: rule.controller().to_string(),
                    action: rule.action().to_string(),
                    args,
                };
            }
        }

        convention::resolve(path, &self.config.defaults)
    }

    /// Returns the active configuration.
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Replaces the configuration and rebuilds the rule table.
    ///
    /// # Errors
    ///
    /// Returns an error if the new configuration is invalid; the previous
    /// configuration stays active in that case.
    pub fn set_config(&mut self, config: RouterConfig) -> WaypointResult<()> {
        let table = RuleTable::build(&config.rules)?;
        self.config = config;
        self.table = table;
        Ok(())
    }
}

/// Decodes a percent-encoded path capture, treating `+` as a space.
fn urldecode(input: &str) -> String {
    let plus_decoded = input.replace('+', " ");
    percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use waypoint_core::settings::RuleDecl;

    fn router(rules: Vec<RuleDecl>) -> Router {
        Router::new(RouterConfig {
            rules,
            ..RouterConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_resolve_explicit_rule() {
        let router = router(vec![RuleDecl::new(
            r"^about$",
            "App::Home::PageController",
            "aboutAction",
        )]);

        let dispatch = router.resolve("about", "GET");
        assert_eq!(dispatch.controller, "App::Home::PageController");
        assert_eq!(dispatch.action, "aboutAction");
        assert!(dispatch.args.is_empty());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let router = router(vec![RuleDecl::new(
            r"^post/(\d+)$",
            "App::Blog::PostController",
            "showAction",
        )
        .map(1, "id")]);

        let first = router.resolve("post/9", "GET");
        let second = router.resolve("post/9", "GET");
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_match_wins_within_bucket() {
        let router = router(vec![
            RuleDecl::new(r"^post/\d+$", "App::Blog::PostController", "showAction")
                .with_methods(&["GET"]),
            RuleDecl::new(r"^post/.+$", "App::Blog::ArchiveController", "catchAllAction")
                .with_methods(&["GET"]),
        ]);

        let dispatch = router.resolve("post/42", "GET");
        assert_eq!(dispatch.controller, "App::Blog::PostController");
    }

    #[test]
    fn test_method_bucket_beats_wildcard_regardless_of_order() {
        // The wildcard rule is declared first but must lose to the
        // method-specific rule.
        let router = router(vec![
            RuleDecl::new(r"^post/(\d+)$", "App::Blog::AnyController", "anyAction"),
            RuleDecl::new(r"^post/(\d+)$", "App::Blog::PostController", "showAction")
                .with_methods(&["GET"]),
        ]);

        let get = router.resolve("post/7", "GET");
        assert_eq!(get.controller, "App::Blog::PostController");

        let post = router.resolve("post/7", "POST");
        assert_eq!(post.controller, "App::Blog::AnyController");
    }

    #[test]
    fn test_head_routes_like_get() {
        let router = router(vec![RuleDecl::new(
            r"^post/(\d+)$",
            "App::Blog::PostController",
            "showAction",
        )
        .with_methods(&["GET"])
        .map(1, "id")]);

        let get = router.resolve("post/42", "GET");
        let head = router.resolve("post/42", "HEAD");
        assert_eq!(get, head);
    }

    #[test]
    fn test_method_matching_is_case_insensitive() {
        let router = router(vec![RuleDecl::new(
            r"^ping$",
            "App::Ops::StatusController",
            "pingAction",
        )
        .with_methods(&["get"])]);

        let dispatch = router.resolve("ping", "get");
        assert_eq!(dispatch.controller, "App::Ops::StatusController");
    }

    #[test]
    fn test_captured_value_overrides_static_arg() {
        let router = router(vec![RuleDecl::new(
            r"^post/(\d+)$",
            "App::Blog::PostController",
            "showAction",
        )
        .map(1, "id")
        .arg("id", "0")
        .arg("format", "html")]);

        let dispatch = router.resolve("post/42", "GET");
        assert_eq!(dispatch.args.get("id").unwrap(), "42");
        assert_eq!(dispatch.args.get("format").unwrap(), "html");
    }

    #[test]
    fn test_captures_are_percent_decoded() {
        let router = router(vec![RuleDecl::new(
            r"^tag/([^/]+)$",
            "App::Blog::TagController",
            "showAction",
        )
        .map(1, "name")]);

        let dispatch = router.resolve("tag/a%20b", "GET");
        assert_eq!(dispatch.args.get("name").unwrap(), "a b");

        let dispatch = router.resolve("tag/a+b", "GET");
        assert_eq!(dispatch.args.get("name").unwrap(), "a b");
    }

    #[test]
    fn test_unmapped_captures_are_discarded() {
        let router = router(vec![RuleDecl::new(
            r"^archive/(\d{4})/(\d{2})$",
            "App::Blog::ArchiveController",
            "monthAction",
        )
        .map(1, "year")]);

        let dispatch = router.resolve("archive/2024/06", "GET");
        assert_eq!(dispatch.args.get("year").unwrap(), "2024");
        assert_eq!(dispatch.args.len(), 1);
    }

    #[test]
    fn test_out_of_range_map_position_is_omitted() {
        let router = router(vec![RuleDecl::new(
            r"^post/(\d+)$",
            "App::Blog::PostController",
            "showAction",
        )
        .map(1, "id")
        .map(5, "ghost")]);

        let dispatch = router.resolve("post/42", "GET");
        assert_eq!(dispatch.args.get("id").unwrap(), "42");
        assert!(!dispatch.args.contains_key("ghost"));
    }

    #[test]
    fn test_untaken_alternation_branch_is_omitted() {
        let router = router(vec![RuleDecl::new(
            r"^(?:post/(\d+)|tag/(\w+))$",
            "App::Blog::LookupController",
            "findAction",
        )
        .map(1, "id")
        .map(2, "tag")]);

        let dispatch = router.resolve("tag/rust", "GET");
        assert_eq!(dispatch.args.get("tag").unwrap(), "rust");
        assert!(!dispatch.args.contains_key("id"));
    }

    #[test]
    fn test_malformed_pattern_falls_through_to_next_rule() {
        let router = router(vec![
            RuleDecl::new(r"^post/(unclosed$", "App::Blog::BrokenController", "brokenAction")
                .with_methods(&["GET"]),
            RuleDecl::new(r"^post/.+$", "App::Blog::PostController", "showAction")
                .with_methods(&["GET"]),
        ]);

        let dispatch = router.resolve("post/42", "GET");
        assert_eq!(dispatch.controller, "App::Blog::PostController");
    }

    #[test]
    fn test_no_match_falls_back_to_convention() {
        let router = router(vec![RuleDecl::new(
            r"^post/(\d+)$",
            "App::Blog::PostController",
            "showAction",
        )]);

        let dispatch = router.resolve("/shop/cart/view", "GET");
        assert_eq!(dispatch.controller, "App::Shop::CartController");
        assert_eq!(dispatch.action, "viewAction");
    }

    #[test]
    fn test_empty_path_resolves_to_defaults() {
        let router = router(vec![]);
        let dispatch = router.resolve("", "GET");
        assert_eq!(dispatch.controller, "App::Home::IndexController");
        assert_eq!(dispatch.action, "indexAction");
    }

    #[test]
    fn test_config_accessor() {
        let router = router(vec![RuleDecl::new(r"^a$", "App::A::AController", "aAction")]);
        assert_eq!(router.config().rules.len(), 1);
    }

    #[test]
    fn test_set_config_rebuilds_table() {
        let mut router = router(vec![RuleDecl::new(
            r"^old$",
            "App::Old::OldController",
            "oldAction",
        )]);

        router
            .set_config(RouterConfig {
                rules: vec![RuleDecl::new(r"^new$", "App::New::NewController", "newAction")],
                ..RouterConfig::default()
            })
            .unwrap();

        let dispatch = router.resolve("new", "GET");
        assert_eq!(dispatch.controller, "App::New::NewController");
        // The old rule is gone; "old" now resolves by convention.
        let dispatch = router.resolve("old", "GET");
        assert_eq!(dispatch.controller, "App::Old::IndexController");
    }

    #[test]
    fn test_set_config_rejects_invalid_and_keeps_previous() {
        let mut router = router(vec![RuleDecl::new(
            r"^keep$",
            "App::Keep::KeepController",
            "keepAction",
        )]);

        let bad = RuleDecl::new(r"^bad$", "", "");
        assert!(router
            .set_config(RouterConfig {
                rules: vec![bad],
                ..RouterConfig::default()
            })
            .is_err());

        let dispatch = router.resolve("keep", "GET");
        assert_eq!(dispatch.controller, "App::Keep::KeepController");
    }

    #[test]
    fn test_urldecode() {
        assert_eq!(urldecode("a%20b"), "a b");
        assert_eq!(urldecode("a+b"), "a b");
        assert_eq!(urldecode("plain"), "plain");
        assert_eq!(urldecode("%C3%A9"), "é");
    }
}
