//! The route tree, route table, and path matcher.
//!
//! Routes are registered as patterns (`/users/{id}`, `/files/{path:*}`) and compiled into a
//! trie keyed by path segment. Matching walks the trie segment by segment, preferring an
//! exact static child over a named parameter child over a trailing wildcard, and backtracks
//! when a deeper branch fails so that `/users/me` matches a literal `me` segment even when a
//! sibling `{id}` branch exists.
//!
//! [`Router`] is the sub-mountable builder applications use to group routes under a base
//! path before handing them to [`crate::app::App::router`]; [`RouteTable`] is the frozen,
//! read-only structure the dispatcher matches requests against.

use crate::req::route_params::RouteParams;
use crate::types::{HttpMethods, RouteBuilder, RouterFns};
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// A constraint narrowing what a named path segment is allowed to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Constraint {
    /// `{id:int}` - an unsigned or signed integer.
    Int,
    /// `{id:uuid}` - a canonical, hyphenated UUID.
    Uuid,
    /// `{id:word}` - one or more ASCII alphanumerics or underscores.
    Word,
    /// `{id:alpha}` - one or more ASCII alphabetic characters.
    Alpha,
}

impl Constraint {
    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "int" => Some(Constraint::Int),
            "uuid" => Some(Constraint::Uuid),
            "word" => Some(Constraint::Word),
            "alpha" => Some(Constraint::Alpha),
            _ => None,
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Constraint::Int => !value.is_empty()
                && value
                    .strip_prefix('-')
                    .unwrap_or(value)
                    .chars()
                    .all(|c| c.is_ascii_digit())
                && !value.strip_prefix('-').unwrap_or(value).is_empty(),
            Constraint::Uuid => is_uuid(value),
            Constraint::Word => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            Constraint::Alpha => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()),
        }
    }
}

fn is_uuid(value: &str) -> bool {
    let groups: Vec<&str> = value.split('-').collect();
    let lens = [8, 4, 4, 4, 12];
    groups.len() == 5
        && groups
            .iter()
            .zip(lens.iter())
            .all(|(g, len)| g.len() == *len && g.chars().all(|c| c.is_ascii_hexdigit()))
}

/// One parsed pattern segment.
#[derive(Debug, Clone)]
enum Segment {
    Static(String),
    Param { name: String, constraint: Option<Constraint> },
    Wildcard { name: String },
}

fn parse_segment(raw: &str) -> Segment {
    if raw == "*" {
        return Segment::Wildcard { name: "*".to_string() };
    }
    if let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        if let Some((name, tag)) = inner.split_once(':') {
            if tag == "*" {
                return Segment::Wildcard { name: name.to_string() };
            }
            return Segment::Param {
                name: name.to_string(),
                constraint: Constraint::parse(tag),
            };
        }
        return Segment::Param { name: inner.to_string(), constraint: None };
    }
    Segment::Static(raw.to_string())
}

fn pattern_segments(pattern: &str) -> Vec<Segment> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(parse_segment)
        .collect()
}

/// Collapses `//`, resolves `.`/`..` without escaping the root, and strips a trailing
/// slash (except for the root path itself). Percent-encoding is left untouched.
pub fn normalize_path(path: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => continue,
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    if out.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", out.join("/"))
    }
}

#[derive(Default)]
struct TrieNode {
    static_children: HashMap<String, TrieNode>,
    param_child: Option<Box<ParamChild>>,
    wildcard: Option<WildcardLeaf>,
    handlers: HashMap<HttpMethods, Arc<RouteBuilder>>,
}

struct ParamChild {
    name: String,
    constraint: Option<Constraint>,
    node: TrieNode,
}

struct WildcardLeaf {
    name: String,
    handlers: HashMap<HttpMethods, Arc<RouteBuilder>>,
}

impl TrieNode {
    /// Inserts a route at the path described by `segments`.
    ///
    /// A node holds at most one parameter child and one wildcard child; inserting a
    /// conflicting variant (different name or constraint) at an already-occupied slot, or
    /// a duplicate `(method, path)` registration, is a configuration error.
    fn insert(&mut self, segments: &[Segment], route: Arc<RouteBuilder>) -> Result<(), String> {
        match segments.split_first() {
            None => {
                if self.handlers.contains_key(&route.method) {
                    return Err(format!(
                        "duplicate route registration: {} {}",
                        route.method, route.path
                    ));
                }
                self.handlers.insert(route.method.clone(), route);
                Ok(())
            }
            Some((Segment::Static(lit), rest)) => self
                .static_children
                .entry(lit.clone())
                .or_default()
                .insert(rest, route),
            Some((Segment::Param { name, constraint }, rest)) => {
                if let Some(existing) = &self.param_child {
                    if &existing.name != name || &existing.constraint != constraint {
                        return Err(format!(
                            "conflicting parameter child at this node: `{{{}}}` already registered, cannot also register `{{{}}}`",
                            existing.name, name
                        ));
                    }
                }
                let child = self.param_child.get_or_insert_with(|| {
                    Box::new(ParamChild {
                        name: name.clone(),
                        constraint: constraint.clone(),
                        node: TrieNode::default(),
                    })
                });
                child.node.insert(rest, route)
            }
            Some((Segment::Wildcard { name }, _rest)) => {
                if let Some(existing) = &self.wildcard {
                    if &existing.name != name {
                        return Err(format!(
                            "conflicting wildcard child at this node: `{{{}:*}}` already registered, cannot also register `{{{}:*}}`",
                            existing.name, name
                        ));
                    }
                    if existing.handlers.contains_key(&route.method) {
                        return Err(format!(
                            "duplicate route registration: {} {}",
                            route.method, route.path
                        ));
                    }
                }
                let leaf = self.wildcard.get_or_insert_with(|| WildcardLeaf {
                    name: name.clone(),
                    handlers: HashMap::new(),
                });
                leaf.handlers.insert(route.method.clone(), route);
                Ok(())
            }
        }
    }

    /// Tries, in order: exact static child, constrained param child, wildcard.
    /// Backtracks up through siblings when a deeper branch can't complete the match.
    fn walk(&self, segments: &[&str]) -> WalkResult {
        match segments.split_first() {
            None => {
                if self.handlers.is_empty() {
                    WalkResult::NotFound
                } else {
                    WalkResult::Found(RouteParams::new())
                }
            }
            Some((seg, rest)) => {
                if let Some(child) = self.static_children.get(*seg) {
                    match child.walk(rest) {
                        WalkResult::Found(params) => return WalkResult::Found(params),
                        WalkResult::MethodNotAllowed(allowed) if rest.is_empty() => {
                            return WalkResult::MethodNotAllowed(allowed)
                        }
                        _ => {}
                    }
                }

                if let Some(param) = &self.param_child {
                    let ok = param
                        .constraint
                        .as_ref()
                        .map(|c| c.matches(seg))
                        .unwrap_or(true);
                    if ok {
                        match param.node.walk(rest) {
                            WalkResult::Found(mut params) => {
                                params.insert(param.name.clone(), (*seg).to_string());
                                return WalkResult::Found(params);
                            }
                            WalkResult::MethodNotAllowed(allowed) if rest.is_empty() => {
                                return WalkResult::MethodNotAllowed(allowed)
                            }
                            _ => {}
                        }
                    }
                }

                if let Some(wildcard) = &self.wildcard {
                    if wildcard.handlers.is_empty() {
                        return WalkResult::NotFound;
                    }
                    let mut params = RouteParams::new();
                    let rest_segments: Vec<String> =
                        std::iter::once((*seg).to_string()).chain(rest.iter().map(|s| s.to_string())).collect();
                    params.insert_many(wildcard.name.clone(), rest_segments);
                    return WalkResult::Found(params);
                }

                // This node matched the leaf path but has no handler for the method we need;
                // surface an allow-list for a 405 rather than a bare 404 when terminal.
                if rest.is_empty() {
                    if let Some(child) = self.static_children.get(*seg) {
                        if !child.handlers.is_empty() {
                            let allowed: Vec<HttpMethods> = child.handlers.keys().cloned().collect();
                            return WalkResult::MethodNotAllowed(allowed);
                        }
                    }
                }

                WalkResult::NotFound
            }
        }
    }
}

enum WalkResult {
    Found(RouteParams),
    MethodNotAllowed(Vec<HttpMethods>),
    NotFound,
}

/// Outcome of matching a normalized request path and method against a [`RouteTable`].
pub(crate) enum MatchOutcome {
    /// A route matched; carries the matched route and its captured path parameters.
    Matched(Arc<RouteBuilder>, RouteParams),
    /// The path matches a registered route, but not for this method.
    MethodNotAllowed(Vec<HttpMethods>),
    /// No registered route matches this path.
    NotFound,
}

/// Capacity of the normalized-path intern cache each [`RouteTable`] carries.
const PATH_INTERN_CAPACITY: usize = 1024;

/// The frozen, read-only route table the dispatcher matches every request against.
///
/// Built once from the application's registered routes; the trie itself never mutates, so
/// concurrent lookups never contend on it. The one exception is the normalized-path intern
/// cache: a small LRU keyed by raw request path, guarded by a single short-held mutex, so a
/// hot path doesn't re-run `normalize_path`'s segment walk on every request.
pub(crate) struct RouteTable {
    root: TrieNode,
    routes: Vec<Arc<RouteBuilder>>,
    path_intern: Mutex<LruCache<String, String>>,
}

impl RouteTable {
    /// Compiles a route table from an application's registered routes.
    ///
    /// # Panics
    ///
    /// Panics if two routes register a duplicate `(method, normalized path)`, or if a
    /// conflicting parameter/wildcard variant is inserted at the same trie node — both are
    /// configuration errors caught at registration time rather than silently resolved.
    pub(crate) fn build(routes: &[Arc<RouteBuilder>]) -> Self {
        let mut root = TrieNode::default();
        for route in routes {
            let pattern = normalize_path(&route.path);
            let segments = pattern_segments(&pattern);
            if let Err(e) = root.insert(&segments, Arc::clone(route)) {
                panic!("route table configuration error: {e}");
            }
        }
        RouteTable {
            root,
            routes: routes.to_vec(),
            path_intern: Mutex::new(LruCache::new(
                NonZeroUsize::new(PATH_INTERN_CAPACITY).expect("capacity is a nonzero constant"),
            )),
        }
    }

    /// Normalizes `path`, reusing a cached result for paths seen recently instead of
    /// re-walking `normalize_path`'s segments every time. Falls back to an uncached
    /// normalization if the lock is poisoned rather than propagating a panic onto the
    /// request path.
    fn intern_path(&self, path: &str) -> String {
        if let Ok(mut cache) = self.path_intern.lock() {
            if let Some(hit) = cache.get(path) {
                return hit.clone();
            }
            let normalized = normalize_path(path);
            cache.put(path.to_string(), normalized.clone());
            return normalized;
        }
        normalize_path(path)
    }

    /// Matches a normalized request path against the table for the given method.
    ///
    /// `HEAD` falls back to a registered `GET` handler when no explicit `HEAD` route exists.
    pub(crate) fn match_route(&self, method: &HttpMethods, path: &str) -> MatchOutcome {
        let normalized = self.intern_path(path);
        let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

        match self.root.walk(&segments) {
            WalkResult::Found(params) => {
                let node = self.descend(&segments);
                if let Some(node) = node {
                    if let Some(route) = node.handlers.get(method) {
                        return MatchOutcome::Matched(Arc::clone(route), params);
                    }
                    if *method == HttpMethods::HEAD {
                        if let Some(route) = node.handlers.get(&HttpMethods::GET) {
                            return MatchOutcome::Matched(Arc::clone(route), params);
                        }
                    }
                    if !node.handlers.is_empty() {
                        return MatchOutcome::MethodNotAllowed(node.handlers.keys().cloned().collect());
                    }
                }
                // wildcard/param leaves don't live in the static trie path descended above;
                // re-resolve directly through the per-method handler carried in `params`' match.
                self.match_terminal(&segments, method)
            }
            WalkResult::MethodNotAllowed(allowed) => MatchOutcome::MethodNotAllowed(allowed),
            WalkResult::NotFound => MatchOutcome::NotFound,
        }
    }

    /// Descends the static/param spine for `segments`, used to recover the terminal node's
    /// handler map once `walk` has already confirmed a match exists.
    fn descend(&self, segments: &[&str]) -> Option<&TrieNode> {
        let mut node = &self.root;
        for seg in segments {
            if let Some(child) = node.static_children.get(*seg) {
                node = child;
                continue;
            }
            if let Some(param) = &node.param_child {
                let ok = param.constraint.as_ref().map(|c| c.matches(seg)).unwrap_or(true);
                if ok {
                    node = &param.node;
                    continue;
                }
            }
            return None;
        }
        Some(node)
    }

    fn match_terminal(&self, segments: &[&str], method: &HttpMethods) -> MatchOutcome {
        let mut node = &self.root;
        for (i, seg) in segments.iter().enumerate() {
            if let Some(child) = node.static_children.get(*seg) {
                node = child;
                continue;
            }
            if let Some(param) = &node.param_child {
                let ok = param.constraint.as_ref().map(|c| c.matches(seg)).unwrap_or(true);
                if ok {
                    node = &param.node;
                    continue;
                }
            }
            if let Some(wildcard) = &node.wildcard {
                if let Some(route) = wildcard.handlers.get(method) {
                    let mut params = RouteParams::new();
                    params.insert_many(
                        wildcard.name.clone(),
                        segments[i..].iter().map(|s| s.to_string()).collect(),
                    );
                    return MatchOutcome::Matched(Arc::clone(route), params);
                }
                return MatchOutcome::NotFound;
            }
            return MatchOutcome::NotFound;
        }
        if let Some(route) = node.handlers.get(method) {
            return MatchOutcome::Matched(Arc::clone(route), RouteParams::new());
        }
        MatchOutcome::NotFound
    }

    /// All registered routes, for introspection (e.g. building an `OPTIONS` allow-list at
    /// startup, or printing a route manifest).
    pub(crate) fn routes(&self) -> &[Arc<RouteBuilder>] {
        &self.routes
    }
}

/// A sub-mountable group of routes with a shared base path.
///
/// Build a `Router`, register handlers on it with [`RouterFns`]'s `get`/`post`/etc, then hand
/// it to [`crate::app::App::router`] to mount every route under `base_path`.
///
/// ```
/// use routen::{router::Router, req::HttpRequest, res::HttpResponse, types::RouterFns};
///
/// async fn status(_req: HttpRequest, res: HttpResponse) -> HttpResponse {
///     res.ok().json(serde_json::json!({"status": "ok"}))
/// }
///
/// let mut api = Router::new("/api/v1");
/// api.get("/status", status);
/// ```
pub struct Router {
    pub(crate) base_path: String,
    routes: Vec<Arc<RouteBuilder>>,
}

impl Router {
    /// Creates an empty router mounted at `base_path` (e.g. `"/api/v1"`).
    pub fn new(base_path: &str) -> Self {
        Router {
            base_path: base_path.to_string(),
            routes: Vec::new(),
        }
    }
}

impl RouterFns for Router {
    fn routes(&mut self) -> &mut Vec<Arc<RouteBuilder>> {
        &mut self.routes
    }
}

/// One entry in a [`RouteManifest`]: a single registered route for introspection.
#[derive(Debug, Clone)]
pub struct RouteManifestEntry {
    /// The HTTP method this entry answers.
    pub method: HttpMethods,
    /// The route's normalized path pattern.
    pub path: String,
}

/// A snapshot of every route registered on an [`App`](crate::app::App), for introspection
/// (debugging, generating documentation, or printing a startup summary).
#[derive(Debug, Clone, Default)]
pub struct RouteManifest {
    /// Every registered route, in registration order.
    pub entries: Vec<RouteManifestEntry>,
}

impl RouteManifest {
    pub(crate) fn from_routes(routes: &[Arc<RouteBuilder>]) -> Self {
        RouteManifest {
            entries: routes
                .iter()
                .map(|r| RouteManifestEntry {
                    method: r.method.clone(),
                    path: normalize_path(&r.path),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{req::HttpRequest, res::HttpResponse};

    fn make_route(method: HttpMethods, path: &str) -> Arc<RouteBuilder> {
        Arc::new(RouteBuilder {
            path: path.to_string(),
            method,
            handler: Arc::new(|_req: HttpRequest, res: HttpResponse| {
                Box::pin(async move { res.ok().text("ok") })
                    as std::pin::Pin<Box<dyn std::future::Future<Output = HttpResponse> + Send>>
            }),
            middlewares: std::sync::RwLock::new(Vec::new()),
        })
    }

    #[test]
    fn normalizes_duplicate_slashes_and_dot_segments() {
        assert_eq!(normalize_path("//users//42/"), "/users/42");
        assert_eq!(normalize_path("/a/./b/../c"), "/a/c");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn static_segment_wins_over_param_sibling() {
        let routes = vec![make_route(HttpMethods::GET, "/users/me"), make_route(HttpMethods::GET, "/users/{id}")];
        let table = RouteTable::build(&routes);

        match table.match_route(&HttpMethods::GET, "/users/me") {
            MatchOutcome::Matched(route, params) => {
                assert_eq!(route.path, "/users/me");
                assert!(params.is_empty());
            }
            _ => panic!("expected a match"),
        }

        match table.match_route(&HttpMethods::GET, "/users/42") {
            MatchOutcome::Matched(route, params) => {
                assert_eq!(route.path, "/users/{id}");
                assert_eq!(params.get("id"), Some("42"));
            }
            _ => panic!("expected a match"),
        }
    }

    #[test]
    fn unknown_method_on_known_path_is_method_not_allowed() {
        let routes = vec![make_route(HttpMethods::GET, "/users")];
        let table = RouteTable::build(&routes);

        match table.match_route(&HttpMethods::POST, "/users") {
            MatchOutcome::MethodNotAllowed(allowed) => assert_eq!(allowed, vec![HttpMethods::GET]),
            _ => panic!("expected 405"),
        }
    }

    #[test]
    fn options_on_known_path_without_explicit_handler_is_method_not_allowed() {
        // The dispatcher's default-OPTIONS handler relies on this falling through to
        // MethodNotAllowed (not NotFound) so it can reply 204 + Allow instead of 404.
        let routes = vec![make_route(HttpMethods::GET, "/users"), make_route(HttpMethods::POST, "/users")];
        let table = RouteTable::build(&routes);

        match table.match_route(&HttpMethods::OPTIONS, "/users") {
            MatchOutcome::MethodNotAllowed(allowed) => {
                assert_eq!(allowed.len(), 2);
                assert!(allowed.contains(&HttpMethods::GET));
                assert!(allowed.contains(&HttpMethods::POST));
            }
            _ => panic!("expected 405 for an unregistered OPTIONS"),
        }
    }

    #[test]
    fn unknown_path_is_not_found() {
        let routes = vec![make_route(HttpMethods::GET, "/users")];
        let table = RouteTable::build(&routes);

        assert!(matches!(table.match_route(&HttpMethods::GET, "/nope"), MatchOutcome::NotFound));
    }

    #[test]
    fn head_falls_back_to_get() {
        let routes = vec![make_route(HttpMethods::GET, "/ping")];
        let table = RouteTable::build(&routes);

        match table.match_route(&HttpMethods::HEAD, "/ping") {
            MatchOutcome::Matched(route, _) => assert_eq!(route.method, HttpMethods::GET),
            _ => panic!("expected HEAD to fall back to GET"),
        }
    }

    #[test]
    fn wildcard_captures_remaining_segments() {
        let routes = vec![make_route(HttpMethods::GET, "/files/{path:*}")];
        let table = RouteTable::build(&routes);

        match table.match_route(&HttpMethods::GET, "/files/a/b/c.txt") {
            MatchOutcome::Matched(_, params) => {
                assert_eq!(params.get_all("path"), Some(&["a".to_string(), "b".to_string(), "c.txt".to_string()][..]));
            }
            _ => panic!("expected a wildcard match"),
        }
    }

    #[test]
    fn int_constraint_rejects_non_numeric_segment() {
        let routes = vec![make_route(HttpMethods::GET, "/users/{id:int}")];
        let table = RouteTable::build(&routes);

        assert!(matches!(table.match_route(&HttpMethods::GET, "/users/abc"), MatchOutcome::NotFound));
        assert!(matches!(table.match_route(&HttpMethods::GET, "/users/42"), MatchOutcome::Matched(..)));
    }

    #[test]
    #[should_panic(expected = "duplicate route registration")]
    fn duplicate_method_and_path_is_a_configuration_error() {
        let routes = vec![
            make_route(HttpMethods::GET, "/users"),
            make_route(HttpMethods::GET, "/users"),
        ];
        RouteTable::build(&routes);
    }

    #[test]
    #[should_panic(expected = "duplicate route registration")]
    fn duplicate_wildcard_route_is_a_configuration_error() {
        let routes = vec![
            make_route(HttpMethods::GET, "/files/{path:*}"),
            make_route(HttpMethods::GET, "/files/{path:*}"),
        ];
        RouteTable::build(&routes);
    }

    #[test]
    #[should_panic(expected = "conflicting parameter child")]
    fn conflicting_param_names_at_the_same_node_is_a_configuration_error() {
        let routes = vec![
            make_route(HttpMethods::GET, "/users/{id}"),
            make_route(HttpMethods::POST, "/users/{name}"),
        ];
        RouteTable::build(&routes);
    }

    #[test]
    #[should_panic(expected = "conflicting parameter child")]
    fn conflicting_param_constraints_at_the_same_node_is_a_configuration_error() {
        let routes = vec![
            make_route(HttpMethods::GET, "/users/{id}"),
            make_route(HttpMethods::POST, "/users/{id:int}"),
        ];
        RouteTable::build(&routes);
    }

    #[test]
    #[should_panic(expected = "conflicting wildcard child")]
    fn conflicting_wildcard_names_at_the_same_node_is_a_configuration_error() {
        let routes = vec![
            make_route(HttpMethods::GET, "/files/{path:*}"),
            make_route(HttpMethods::POST, "/files/{rest:*}"),
        ];
        RouteTable::build(&routes);
    }

    #[test]
    fn same_param_name_and_constraint_different_methods_is_allowed() {
        let routes = vec![
            make_route(HttpMethods::GET, "/users/{id}"),
            make_route(HttpMethods::POST, "/users/{id}"),
        ];
        let table = RouteTable::build(&routes);

        assert!(matches!(
            table.match_route(&HttpMethods::GET, "/users/1"),
            MatchOutcome::Matched(..)
        ));
        assert!(matches!(
            table.match_route(&HttpMethods::POST, "/users/1"),
            MatchOutcome::Matched(..)
        ));
    }

    #[test]
    fn param_and_wildcard_child_can_coexist_at_the_same_node() {
        let routes = vec![
            make_route(HttpMethods::GET, "/files/{id}"),
            make_route(HttpMethods::GET, "/files/{path:*}"),
        ];
        let table = RouteTable::build(&routes);

        assert!(matches!(
            table.match_route(&HttpMethods::GET, "/files/report"),
            MatchOutcome::Matched(..)
        ));
    }

    #[test]
    fn repeated_lookups_of_the_same_path_hit_the_intern_cache() {
        let routes = vec![make_route(HttpMethods::GET, "/users/{id}")];
        let table = RouteTable::build(&routes);

        for _ in 0..3 {
            assert!(matches!(
                table.match_route(&HttpMethods::GET, "//users//42/"),
                MatchOutcome::Matched(..)
            ));
        }

        let cache = table.path_intern.lock().unwrap();
        assert_eq!(cache.peek("//users//42/").map(String::as_str), Some("/users/42"));
    }
}
