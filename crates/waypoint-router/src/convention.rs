//! Convention-based dispatch resolution.
//!
//! When no explicit rule matches, routing identity is derived from the path
//! itself: `/module/controller/action` becomes
//! `Namespace::Module::NameController` / `nameAction`, with gaps filled from
//! the configured [`Defaults`]. This lets a deployment serve regular URL
//! shapes with zero rules, while explicit rules take priority for anything
//! irregular.

use std::sync::OnceLock;

use regex::Regex;

use waypoint_core::settings::Defaults;
use waypoint_core::text::capfirst;

use crate::dispatch::Dispatch;

/// Paths made of plain identifier segments only; anything else resolves to
/// the defaults untouched.
fn plain_path() -> &'static Regex {
    static PLAIN_PATH: OnceLock<Regex> = OnceLock::new();
    PLAIN_PATH.get_or_init(|| Regex::new(r"^[a-zA-Z\d/_]+$").unwrap())
}

/// Derives a [`Dispatch`] from the path by naming convention.
///
/// Leading and trailing slashes are trimmed. Up to three plain segments
/// select module, controller, and action; segments beyond the third are
/// ignored and do not become arguments. Paths that are empty or contain
/// characters outside `[A-Za-z0-9/_]` resolve to the defaults unchanged.
///
/// # Examples
///
/// ```
/// use waypoint_core::settings::Defaults;
/// use waypoint_router::convention;
///
/// let defaults = Defaults::default();
///
/// let dispatch = convention::resolve("/blog/post/show", &defaults);
/// assert_eq!(dispatch.controller, "App::Blog::PostController");
/// assert_eq!(dispatch.action, "showAction");
///
/// let dispatch = convention::resolve("", &defaults);
/// assert_eq!(dispatch.controller, "App::Home::IndexController");
/// assert_eq!(dispatch.action, "indexAction");
/// ```
pub fn resolve(path: &str, defaults: &Defaults) -> Dispatch {
    let trimmed = path.trim_matches('/');

    let mut module = defaults.module.clone();
    let mut controller = defaults.controller.clone();
    let mut action = defaults.action.clone();

    if plain_path().is_match(trimmed) {
        let mut segments = trimmed.split('/');
        if let Some(segment) = segments.next() {
            module = capfirst(segment);
        }
        if let Some(segment) = segments.next() {
            controller = format!("{}Controller", capfirst(segment));
        }
        if let Some(segment) = segments.next() {
            action = format!("{segment}Action");
        }
    }

    Dispatch {
        controller: format!("{}::{module}::{controller}", defaults.namespace),
        action,
        args: defaults.args.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_returns_defaults() {
        let dispatch = resolve("", &Defaults::default());
        assert_eq!(dispatch.controller, "App::Home::IndexController");
        assert_eq!(dispatch.action, "indexAction");
        assert!(dispatch.args.is_empty());
    }

    #[test]
    fn test_root_slash_returns_defaults() {
        let dispatch = resolve("/", &Defaults::default());
        assert_eq!(dispatch.controller, "App::Home::IndexController");
    }

    #[test]
    fn test_single_segment_sets_module() {
        let dispatch = resolve("/blog", &Defaults::default());
        assert_eq!(dispatch.controller, "App::Blog::IndexController");
        assert_eq!(dispatch.action, "indexAction");
    }

    #[test]
    fn test_two_segments_set_module_and_controller() {
        let dispatch = resolve("/blog/post", &Defaults::default());
        assert_eq!(dispatch.controller, "App::Blog::PostController");
        assert_eq!(dispatch.action, "indexAction");
    }

    #[test]
    fn test_three_segments_set_full_identity() {
        let dispatch = resolve("/blog/post/show", &Defaults::default());
        assert_eq!(dispatch.controller, "App::Blog::PostController");
        assert_eq!(dispatch.action, "showAction");
    }

    #[test]
    fn test_segments_beyond_third_are_ignored() {
        let dispatch = resolve("/blog/post/show/99", &Defaults::default());
        assert_eq!(dispatch.controller, "App::Blog::PostController");
        assert_eq!(dispatch.action, "showAction");
        assert!(dispatch.args.is_empty());
    }

    #[test]
    fn test_irregular_characters_return_defaults() {
        let dispatch = resolve("/foo/bar!", &Defaults::default());
        assert_eq!(dispatch.controller, "App::Home::IndexController");
        assert_eq!(dispatch.action, "indexAction");
    }

    #[test]
    fn test_dashes_are_irregular() {
        let dispatch = resolve("/my-blog/post", &Defaults::default());
        assert_eq!(dispatch.controller, "App::Home::IndexController");
    }

    #[test]
    fn test_underscores_are_plain() {
        let dispatch = resolve("/my_blog/post_list", &Defaults::default());
        assert_eq!(dispatch.controller, "App::My_blog::Post_listController");
    }

    #[test]
    fn test_custom_defaults() {
        let mut defaults = Defaults::default();
        defaults.namespace = "Shop".to_string();
        defaults.args.insert("lang".to_string(), "en".to_string());

        let dispatch = resolve("/cart", &defaults);
        assert_eq!(dispatch.controller, "Shop::Cart::IndexController");
        assert_eq!(dispatch.args.get("lang").unwrap(), "en");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let dispatch = resolve("/blog/post/", &Defaults::default());
        assert_eq!(dispatch.controller, "App::Blog::PostController");
        assert_eq!(dispatch.action, "indexAction");
    }
}
