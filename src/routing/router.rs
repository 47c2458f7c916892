//! Route lookup.
//!
//! # Responsibilities
//! - Store handlers keyed by (method, exact path)
//! - Resolve a request target to a handler or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup: method map, then path map
//! - Exact string match only; no parameters, wildcards or case folding

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;

use crate::handlers::Handler;
use crate::routing::path;

type PathTable = HashMap<String, Arc<dyn Handler>>;

/// Immutable route table.
#[derive(Debug, Default)]
pub struct Router {
    routes: HashMap<Method, PathTable>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// Handler for `method` and `target`, which may be a bare path or an
    /// absolute URL. `None` means no route.
    pub fn resolve(&self, method: &Method, target: &str) -> Option<Arc<dyn Handler>> {
        let path = path::normalize(target);
        self.routes.get(method)?.get(path).cloned()
    }

    /// Number of registered (method, path) pairs.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered (method, path) pairs, sorted.
    pub fn routes(&self) -> Vec<(Method, String)> {
        let mut all: Vec<(Method, String)> = self
            .routes
            .iter()
            .flat_map(|(m, paths)| paths.keys().map(move |p| (m.clone(), p.clone())))
            .collect();
        all.sort_by(|a, b| (a.0.as_str(), &a.1).cmp(&(b.0.as_str(), &b.1)));
        all
    }
}

/// Collects routes, then freezes them into a `Router`.
#[derive(Debug, Default)]
pub struct RouterBuilder {
    routes: HashMap<Method, PathTable>,
}

impl RouterBuilder {
    /// Register `handler` for `method` and the literal `path`.
    /// A later registration for the same pair replaces the earlier one.
    pub fn route(
        mut self,
        method: Method,
        path: impl Into<String>,
        handler: impl Handler + 'static,
    ) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path.into(), Arc::new(handler));
        self
    }

    pub fn build(self) -> Router {
        Router {
            routes: self.routes,
        }
    }
}
