//! Compiled route rules and the per-method rule table.
//!
//! Rule declarations ([`RuleDecl`]) are compiled into shared [`RouteRule`]s
//! and bucketed per HTTP method at router construction. Bucket order is
//! declaration order; matching is strictly first-match, with no specificity
//! scoring. Pattern regexes are compiled lazily on first evaluation so that
//! construction never fails on a malformed pattern.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use regex::Regex;

use waypoint_core::settings::RuleDecl;
use waypoint_core::{WaypointError, WaypointResult};

/// A compiled route rule, immutable after construction.
///
/// The regex is compiled on first evaluation. A pattern that fails to
/// compile is reported once as a configuration warning and the rule behaves
/// as never-matching from then on; it never aborts a request.
#[derive(Debug)]
pub struct RouteRule {
    pattern: String,
    regex: OnceLock<Option<Regex>>,
    controller: String,
    action: String,
    maps: BTreeMap<usize, String>,
    args: HashMap<String, String>,
}

impl RouteRule {
    /// Compiles a declaration, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::ImproperlyConfigured`] if the declaration
    /// has no controller or action, or maps a non-numeric capture position.
    /// Pattern validity is deliberately not checked here.
    fn compile(decl: &RuleDecl) -> WaypointResult<Self> {
        if decl.controller.is_empty() || decl.action.is_empty() {
            return Err(WaypointError::ImproperlyConfigured(format!(
                "Route rule '{}' must name a controller and an action",
                decl.pattern
            )));
        }

        let mut maps = BTreeMap::new();
        for (position, name) in &decl.maps {
            let parsed: usize = position.parse().map_err(|_| {
                WaypointError::ImproperlyConfigured(format!(
                    "Route rule '{}' maps non-numeric capture position '{position}'",
                    decl.pattern
                ))
            })?;
            maps.insert(parsed, name.clone());
        }

        Ok(Self {
            pattern: decl.pattern.clone(),
            regex: OnceLock::new(),
            controller: decl.controller.clone(),
            action: decl.action.clone(),
            maps,
            args: decl.args.clone(),
        })
    }

    /// Returns the pattern source string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the controller identifier.
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Returns the action identifier.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the capture-position to argument-name mapping.
    pub const fn maps(&self) -> &BTreeMap<usize, String> {
        &self.maps
    }

    /// Returns the static arguments.
    pub const fn args(&self) -> &HashMap<String, String> {
        &self.args
    }

    /// Returns the compiled regex, compiling it on first use.
    fn regex(&self) -> Option<&Regex> {
        self.regex
            .get_or_init(|| match Regex::new(&anchored(&self.pattern)) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::warn!(
                        pattern = %self.pattern,
                        %err,
                        "route pattern failed to compile; rule will never match"
                    );
                    None
                }
            })
            .as_ref()
    }

    /// Evaluates the rule against a path, returning capture groups on match.
    pub fn captures<'p>(&self, path: &'p str) -> Option<regex::Captures<'p>> {
        self.regex()?.captures(path)
    }
}

/// Adds `^`/`$` anchors when absent, so rules always match the full path.
fn anchored(pattern: &str) -> String {
    let mut full = if pattern.starts_with('^') {
        pattern.to_string()
    } else {
        format!("^{pattern}")
    };
    if !full.ends_with('$') {
        full.push('$');
    }
    full
}

/// An insertion-ordered bucket of rules for one method token.
///
/// Re-declaring an identical pattern replaces the earlier entry in place;
/// distinct patterns keep declaration order.
#[derive(Debug, Clone, Default)]
struct Bucket {
    rules: Vec<Arc<RouteRule>>,
    by_pattern: HashMap<String, usize>,
}

impl Bucket {
    fn insert(&mut self, rule: Arc<RouteRule>) {
        if let Some(&slot) = self.by_pattern.get(rule.pattern()) {
            self.rules[slot] = rule;
        } else {
            self.by_pattern
                .insert(rule.pattern().to_string(), self.rules.len());
            self.rules.push(rule);
        }
    }
}

/// Per-method rule lookup tables, built once at router construction and
/// never mutated by matching.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    buckets: HashMap<String, Bucket>,
}

impl RuleTable {
    /// Compiles rule declarations into per-method buckets.
    ///
    /// Method tokens are normalized to uppercase. When rules were declared
    /// for `GET` but none for `HEAD`, the `GET` bucket is shared into
    /// `HEAD` (same rules, same order, same references) so `HEAD`
    /// requests route like `GET`.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::ImproperlyConfigured`] if a declaration has
    /// an invalid shape (see [`RouteRule`]). Malformed regexes are not an
    /// error here; they surface as non-matching rules at evaluation time.
    pub fn build(decls: &[RuleDecl]) -> WaypointResult<Self> {
        let mut table = Self::default();

        for decl in decls {
            let rule = Arc::new(RouteRule::compile(decl)?);
            for method in &decl.methods {
                table
                    .buckets
                    .entry(method.to_uppercase())
                    .or_default()
                    .insert(Arc::clone(&rule));
            }
        }

        if !table.buckets.contains_key("HEAD") {
            if let Some(get) = table.buckets.get("GET").cloned() {
                table.buckets.insert("HEAD".to_string(), get);
            }
        }

        Ok(table)
    }

    /// Returns the rules registered for a method token, in declaration order.
    pub fn bucket(&self, method: &str) -> &[Arc<RouteRule>] {
        self.buckets
            .get(method)
            .map_or(&[], |bucket| bucket.rules.as_slice())
    }

    /// Returns true if no rules are registered for any method.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
