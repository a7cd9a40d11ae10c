//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile `/a/:b` style patterns into typed segments
//! - Match a request path and capture parameters
//! - Build a concrete path from a parameter map
//!
//! # Design Decisions
//! - Static segments match case-insensitively
//! - One trailing slash on the incoming path is tolerated
//! - Parameters capture exactly one non-empty segment, percent-decoded
//! - No regex: matching is a single pass over the segments

use std::collections::BTreeMap;

use crate::routing::RouteError;

/// Captured path parameters, keyed by name.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern such as `/history/:id`.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with '/'"))?;

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for raw in rest.split('/') {
                if raw.is_empty() {
                    return Err(invalid("empty segment"));
                }
                match raw.strip_prefix(':') {
                    Some(name) => {
                        let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
                        if name.is_empty() || !name.chars().all(is_word) {
                            return Err(invalid(
                                "parameter names must be non-empty word characters",
                            ));
                        }
                        if segments.iter().any(|s| matches!(s, Segment::Param(n) if n == name)) {
                            return Err(invalid("duplicate parameter name"));
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Static(raw.to_string())),
                }
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of the parameters in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match `path` (already stripped of query and base) against this pattern.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(text) => {
                    if !eq_ignore_case(text, part) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let value = urlencoding::decode(part)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| part.to_string());
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(params)
    }

    /// Build a concrete path, percent-encoding parameter values.
    pub fn build(&self, params: &Params) -> Result<String, RouteError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| RouteError::MissingParam {
                            pattern: self.source.clone(),
                            param: name.clone(),
                        })?;
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }
        Ok(path)
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pattern() {
        let p = PathPattern::parse("/").unwrap();
        assert_eq!(p.matches("/"), Some(Params::new()));
        assert_eq!(p.matches("/outline"), None);
    }

    #[test]
    fn test_static_pattern() {
        let p = PathPattern::parse("/settings/xhs").unwrap();
        assert!(p.matches("/settings/xhs").is_some());
        assert!(p.matches("/settings/xhs/").is_some());
        assert!(p.matches("/Settings/XHS").is_some());
        assert!(p.matches("/settings").is_none());
        assert!(p.matches("/settings/xhs/extra").is_none());
    }

    #[test]
    fn test_param_capture() {
        let p = PathPattern::parse("/history/:id").unwrap();
        let params = p.matches("/history/42").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));

        assert!(p.matches("/history").is_none());
        assert!(p.matches("/history//").is_none());
        assert!(p.matches("/history/42/more").is_none());
    }

    #[test]
    fn test_param_is_percent_decoded() {
        let p = PathPattern::parse("/history/:id").unwrap();
        let params = p.matches("/history/a%20b").unwrap();
        assert_eq!(params["id"], "a b");
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(PathPattern::parse("history").is_err());
        assert!(PathPattern::parse("/a//b").is_err());
        assert!(PathPattern::parse("/a/:").is_err());
        assert!(PathPattern::parse("/a/:id/:id").is_err());
        assert!(PathPattern::parse("/a/:i-d").is_err());
    }

    #[test]
    fn test_param_names() {
        let p = PathPattern::parse("/a/:x/b/:y").unwrap();
        assert_eq!(p.param_names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_build() {
        let p = PathPattern::parse("/history/:id").unwrap();
        let mut params = Params::new();
        params.insert("id".into(), "a b".into());
        assert_eq!(p.build(&params).unwrap(), "/history/a%20b");

        let err = p.build(&Params::new()).unwrap_err();
        assert!(matches!(err, RouteError::MissingParam { ref param, .. } if param == "id"));

        assert_eq!(PathPattern::parse("/").unwrap().build(&Params::new()).unwrap(), "/");
    }
}
