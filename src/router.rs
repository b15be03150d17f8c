//! Path normalisation and the item route table.
//!
//! Page requests are routed by a pure rule over the set of servable paths.
//! Item mutations go through a radix tree per method, the same shape
//! `matchit` gives any router: register a path, get the action back.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use matchit::Router as MatchitRouter;

use crate::error::Error;
use crate::method::Method;

/// Page the root path redirects to; also the only path that accepts a login POST.
pub const LOGIN_PATH: &str = "/login.html";
/// Cookie-gated page that doubles as the item document.
pub const INDEX_PATH: &str = "/index.html";

const PAGE_SUFFIX: &str = ".html";

// ── ValidPathSet ──────────────────────────────────────────────────────────────

/// Absolute paths that may be served, fixed at startup.
#[derive(Clone, Debug, Default)]
pub struct ValidPathSet {
    paths: HashSet<String>,
}

impl ValidPathSet {
    /// One entry per name in `dir`, prefixed with `/`. Not recursive.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let mut paths = HashSet::new();
        for entry in std::fs::read_dir(dir)? {
            let name = entry?.file_name();
            paths.insert(format!("/{}", name.to_string_lossy()));
        }
        Ok(Self { paths })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ValidPathSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { paths: iter.into_iter().map(Into::into).collect() }
    }
}

// ── normalize ─────────────────────────────────────────────────────────────────

/// Result of normalising a request path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Normalized {
    pub target: String,
    pub redirect: bool,
}

/// Canonical page path for `path`, and whether the client must be redirected to it.
///
/// - `/` always redirects to the login page.
/// - A path already ending in `.html` is served as is.
/// - Anything else gets `.html` appended; the redirect is only issued when
///   that page exists, but the candidate is returned either way.
pub fn normalize(path: &str, valid: &ValidPathSet) -> Normalized {
    if path == "/" {
        return Normalized { target: LOGIN_PATH.to_owned(), redirect: true };
    }
    if path.ends_with(PAGE_SUFFIX) {
        return Normalized { target: path.to_owned(), redirect: false };
    }
    let target = format!("{path}{PAGE_SUFFIX}");
    let redirect = valid.contains(&target);
    Normalized { target, redirect }
}

// ── Item routes ───────────────────────────────────────────────────────────────

/// What an item request asks the store to do.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ItemAction {
    Create,
    Update,
    Delete,
}

/// A matched item request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemRoute {
    pub action: ItemAction,
    pub key: String,
    /// Present for create and update.
    pub value: Option<String>,
}

/// Prefix shared by every item route.
pub const ITEMS_PREFIX: &str = "/index/items/";

/// Route table for the `/index/items/...` family. One tree per method.
pub struct ItemRoutes {
    routes: HashMap<Method, MatchitRouter<ItemAction>>,
}

impl ItemRoutes {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
            .add(Method::Post,   "/index/items/{key}/{value}", ItemAction::Create)
            .add(Method::Put,    "/index/items/{key}/{value}", ItemAction::Update)
            .add(Method::Delete, "/index/items/{key}",         ItemAction::Delete)
    }

    fn add(mut self, method: Method, path: &str, action: ItemAction) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, action)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn lookup(&self, method: Method, path: &str) -> Option<ItemRoute> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        Some(ItemRoute {
            action: *matched.value,
            key: matched.params.get("key")?.to_owned(),
            value: matched.params.get("value").map(str::to_owned),
        })
    }
}

impl Default for ItemRoutes {
    fn default() -> Self { Self::new() }
}
