//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     ROUTES (table.rs, static)
//!     → pattern.rs (compile path patterns)
//!     → router.rs (validate names and redirects)
//!     → Freeze as immutable Router
//!
//! Incoming path (history-mode URL)
//!     → strip base, query, fragment
//!     → router.rs (first entry in table order that matches)
//!     → follow redirects
//!     → Return: Resolution (view + params) or RouteError
//! ```
//!
//! # Design Decisions
//! - Table is plain data; no logic lives in entries
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route

pub mod pattern;
pub mod router;
pub mod table;

use thiserror::Error;

pub use pattern::{Params, PathPattern};
pub use router::{Resolution, RouteMatch, Router};
pub use table::{RouteEntry, RouteTarget, View, ROUTES};

/// Errors raised while compiling or resolving routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No route matches the path.
    #[error("No route matches path '{0}'")]
    NotFound(String),

    /// No route is registered under the name.
    #[error("Unknown route name '{0}'")]
    UnknownName(String),

    /// A parameter needed to build a path was not supplied.
    #[error("Missing parameter '{param}' for pattern '{pattern}'")]
    MissingParam { pattern: String, param: String },

    /// Redirects did not settle on a view.
    #[error("Redirect loop while resolving '{0}'")]
    RedirectLoop(String),

    /// Two entries share a name.
    #[error("Duplicate route name '{0}'")]
    DuplicateName(String),

    /// A path pattern could not be compiled.
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A redirect points at a path no route matches.
    #[error("Route '{name}' redirects to '{target}', which matches no route")]
    DanglingRedirect { name: String, target: String },
}
