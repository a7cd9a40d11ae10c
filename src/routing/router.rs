//! Route lookup and resolution.
//!
//! # Responsibilities
//! - Compile and validate the route table
//! - Look up the first entry matching a path
//! - Follow redirects to a view
//! - Build paths for named navigation
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in table order (the table is small)
//! - Explicit NotFound rather than a silent default
//! - Redirect chains are checked at construction and bounded at lookup

use serde::Serialize;
use std::collections::HashSet;

use crate::routing::pattern::{Params, PathPattern};
use crate::routing::table::{RouteEntry, RouteTarget, View, ROUTES};
use crate::routing::RouteError;

/// Maximum number of redirects followed for one lookup.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug)]
struct CompiledRoute {
    entry: &'static RouteEntry,
    pattern: PathPattern,
}

/// A raw match: the entry and its captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub entry: &'static RouteEntry,
    pub params: Params,
}

/// The view a path ultimately leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Name of the route that renders the view.
    pub name: &'static str,
    pub view: View,
    /// Path of the final location, relative to the base.
    pub path: String,
    pub params: Params,
    /// Original path when one or more redirects were followed.
    pub redirected_from: Option<String>,
}

/// Compiled, immutable route table.
#[derive(Debug)]
pub struct Router {
    base: String,
    table: &'static [RouteEntry],
    routes: Vec<CompiledRoute>,
}

impl Router {
    /// Compile `table` with the root base.
    pub fn from_table(table: &'static [RouteEntry]) -> Result<Self, RouteError> {
        let mut names = HashSet::new();
        let mut routes = Vec::with_capacity(table.len());
        for entry in table {
            if !names.insert(entry.name) {
                return Err(RouteError::DuplicateName(entry.name.to_string()));
            }
            routes.push(CompiledRoute {
                entry,
                pattern: PathPattern::parse(entry.path)?,
            });
        }

        let router = Self {
            base: String::new(),
            table,
            routes,
        };
        router.check_redirects()?;

        tracing::debug!(routes = router.routes.len(), "Route table compiled");
        Ok(router)
    }

    /// Compile the application's own table.
    pub fn app() -> Result<Self, RouteError> {
        Self::from_table(ROUTES)
    }

    /// Serve routes below `base` (e.g. `/studio`). `/` means no base.
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = normalize_base(base);
        self
    }

    /// The base prefix, empty for the root.
    pub fn base(&self) -> &str {
        if self.base.is_empty() {
            "/"
        } else {
            &self.base
        }
    }

    /// Entries in table order.
    pub fn entries(&self) -> &'static [RouteEntry] {
        self.table
    }

    /// Look up an entry by name.
    pub fn entry(&self, name: &str) -> Option<&'static RouteEntry> {
        self.routes.iter().map(|r| r.entry).find(|e| e.name == name)
    }

    /// First entry whose pattern matches `path`. Redirects are not followed.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        let relative = self.strip_base(path)?;
        self.match_relative(&relative)
    }

    /// Resolve `path` to a view, following redirects.
    pub fn resolve(&self, path: &str) -> Result<Resolution, RouteError> {
        let not_found = || RouteError::NotFound(path.to_string());
        let start = self.strip_base(path).ok_or_else(not_found)?;
        self.resolve_relative(&start)
            .map_err(|e| match e {
                RouteError::NotFound(_) => not_found(),
                RouteError::RedirectLoop(_) => RouteError::RedirectLoop(path.to_string()),
                other => other,
            })
    }

    /// Path (including base) for the route named `name`.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        let route = self
            .routes
            .iter()
            .find(|r| r.entry.name == name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?;
        let path = route.pattern.build(params)?;
        Ok(self.prefixed(&path))
    }

    /// Prepend the base to a relative path.
    pub fn prefixed(&self, path: &str) -> String {
        if self.base.is_empty() {
            return path.to_string();
        }
        if path == "/" {
            return self.base.clone();
        }
        format!("{}{}", self.base, path)
    }

    fn match_relative(&self, path: &str) -> Option<RouteMatch> {
        self.routes.iter().find_map(|route| {
            route.pattern.matches(path).map(|params| RouteMatch {
                entry: route.entry,
                params,
            })
        })
    }

    fn resolve_relative(&self, start: &str) -> Result<Resolution, RouteError> {
        let mut current = start.to_string();
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let matched = self
                .match_relative(&current)
                .ok_or_else(|| RouteError::NotFound(current.clone()))?;

            match matched.entry.target {
                RouteTarget::View(view) => {
                    return Ok(Resolution {
                        name: matched.entry.name,
                        view,
                        path: current,
                        params: matched.params,
                        redirected_from,
                    });
                }
                RouteTarget::Redirect(target) => {
                    tracing::trace!(
                        from = %current,
                        to = %target,
                        route = matched.entry.name,
                        "Following redirect"
                    );
                    if redirected_from.is_none() {
                        redirected_from = Some(current.clone());
                    }
                    current = target.to_string();
                }
            }
        }

        Err(RouteError::RedirectLoop(start.to_string()))
    }

    fn check_redirects(&self) -> Result<(), RouteError> {
        for route in &self.routes {
            if let RouteTarget::Redirect(target) = route.entry.target {
                match self.resolve_relative(target) {
                    Ok(_) => {}
                    Err(RouteError::NotFound(_)) => {
                        return Err(RouteError::DanglingRedirect {
                            name: route.entry.name.to_string(),
                            target: target.to_string(),
                        });
                    }
                    Err(RouteError::RedirectLoop(_)) => {
                        return Err(RouteError::RedirectLoop(route.entry.path.to_string()));
                    }
                    Err(other) => return Err(other),
                }
            }
        }
        Ok(())
    }

    /// Drop query, fragment and base. `None` if the path lies outside the base.
    fn strip_base(&self, path: &str) -> Option<String> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        if self.base.is_empty() {
            return Some(path);
        }

        let rest = path.strip_prefix(&self.base)?;
        if rest.is_empty() {
            Some("/".to_string())
        } else if rest.starts_with('/') {
            Some(rest.to_string())
        } else {
            None
        }
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
