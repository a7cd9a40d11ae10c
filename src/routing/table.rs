//! The application's route table.
//!
//! Declarative data only: each entry binds a path pattern and a unique name
//! to either a view or a redirect. The table is a `static` slice and is never
//! mutated; [`crate::routing::Router`] compiles it once at startup.

use serde::Serialize;
use std::fmt;

/// View-rendering units the client application provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Home,
    Outline,
    Generate,
    Result,
    History,
    Settings,
    XhsSettings,
    DebugImage,
    PoemCover,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Outline => "outline",
            View::Generate => "generate",
            View::Result => "result",
            View::History => "history",
            View::Settings => "settings",
            View::XhsSettings => "xhs-settings",
            View::DebugImage => "debug-image",
            View::PoemCover => "poem-cover",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a route leads to. Exactly one per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    View(View),
    /// Path of another route to navigate to instead.
    Redirect(&'static str),
}

/// One navigable location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    /// Path pattern; `:name` segments capture parameters.
    pub path: &'static str,
    /// Unique symbolic name for programmatic navigation.
    pub name: &'static str,
    pub target: RouteTarget,
}

impl RouteEntry {
    pub const fn view(path: &'static str, name: &'static str, view: View) -> Self {
        Self { path, name, target: RouteTarget::View(view) }
    }

    pub const fn redirect(path: &'static str, name: &'static str, to: &'static str) -> Self {
        Self { path, name, target: RouteTarget::Redirect(to) }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.target, RouteTarget::Redirect(_))
    }
}

/// Route table in declaration order.
pub static ROUTES: &[RouteEntry] = &[
    RouteEntry::view("/", "home", View::Home),
    RouteEntry::view("/outline", "outline", View::Outline),
    RouteEntry::view("/generate", "generate", View::Generate),
    RouteEntry::view("/result", "result", View::Result),
    RouteEntry::view("/history", "history", View::History),
    RouteEntry::redirect("/brainstorm", "brainstorm", "/"),
    RouteEntry::view("/history/:id", "history-detail", View::History),
    RouteEntry::view("/debug-image", "debug-image", View::DebugImage),
    RouteEntry::view("/settings", "settings", View::Settings),
    RouteEntry::view("/settings/xhs", "xhs-settings", View::XhsSettings),
    RouteEntry::view("/poem-cover", "poem-cover", View::PoemCover),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = ROUTES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), ROUTES.len());
    }

    #[test]
    fn test_brainstorm_is_redirect_to_root() {
        let entry = ROUTES.iter().find(|r| r.name == "brainstorm").unwrap();
        assert_eq!(entry.target, RouteTarget::Redirect("/"));
        assert!(entry.is_redirect());
    }

    #[test]
    fn test_single_parametrized_route() {
        let params: Vec<_> = ROUTES.iter().filter(|r| r.path.contains(':')).collect();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "history-detail");
        assert_eq!(params[0].path, "/history/:id");
    }

    #[test]
    fn test_entry_serialization() {
        let json = serde_json::to_value(ROUTES[5]).unwrap();
        assert_eq!(json["target"]["redirect"], "/");

        let json = serde_json::to_value(ROUTES[9]).unwrap();
        assert_eq!(json["target"]["view"], "xhs-settings");
        assert_eq!(json["name"], "xhs-settings");
    }
}
