//! Client-side route table.
//!
//! Patterns are matched in table order against the location path; the first
//! entry whose segments line up wins. A `:name` segment captures exactly one
//! non-empty path segment, percent-decoded, and hands it to the view as an
//! opaque string.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub type Params = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteName {
    ServicePage,
    TaskStatus,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::ServicePage => "ServicePage",
            RouteName::TaskStatus => "TaskStatus",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved location, ready for view dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Service,
    TaskStatus { id: String },
    NotFound { path: String },
}

impl Route {
    pub fn name(&self) -> Option<RouteName> {
        match self {
            Route::Service => Some(RouteName::ServicePage),
            Route::TaskStatus { .. } => Some(RouteName::TaskStatus),
            Route::NotFound { .. } => None,
        }
    }

    /// Renders the route back into a location path.
    pub fn path(&self) -> String {
        match self {
            Route::Service => "/".to_string(),
            Route::TaskStatus { id } => format!("/tasks/{}", encode_segment(id)),
            Route::NotFound { path } => path.clone(),
        }
    }

    fn from_match(name: RouteName, mut params: Params, path: &str) -> Self {
        match name {
            RouteName::ServicePage => Route::Service,
            RouteName::TaskStatus => match params.remove("id") {
                Some(id) => Route::TaskStatus { id },
                None => Route::NotFound {
                    path: path.to_string(),
                },
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("pattern '{0}' must start with '/'")]
    MissingLeadingSlash(String),
    #[error("pattern '{0}' has an empty segment")]
    EmptySegment(String),
    #[error("pattern '{0}' has a parameter without a name")]
    EmptyParamName(String),
    #[error("pattern '{pattern}' declares parameter '{param}' twice")]
    DuplicateParam { pattern: String, param: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(RouteError::MissingLeadingSlash(raw.to_string()));
        };

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                if part.is_empty() {
                    return Err(RouteError::EmptySegment(raw.to_string()));
                }
                match part.strip_prefix(':') {
                    Some("") => return Err(RouteError::EmptyParamName(raw.to_string())),
                    Some(name) => {
                        let taken = segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(p) if p == name));
                        if taken {
                            return Err(RouteError::DuplicateParam {
                                pattern: raw.to_string(),
                                param: name.to_string(),
                            });
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Literal(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn matches(&self, parts: &[&str]) -> Option<Params> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), decode_segment(part));
                }
            }
        }
        Some(params)
    }
}

#[derive(Clone, Debug)]
pub struct RouteEntry {
    pub pattern: Pattern,
    pub name: RouteName,
}

#[derive(Clone, Debug)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub params: Params,
}

#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The application's two routes: `/` and `/tasks/:id`.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                RouteEntry {
                    pattern: Pattern {
                        raw: "/".into(),
                        segments: Vec::new(),
                    },
                    name: RouteName::ServicePage,
                },
                RouteEntry {
                    pattern: Pattern {
                        raw: "/tasks/:id".into(),
                        segments: vec![
                            Segment::Literal("tasks".into()),
                            Segment::Param("id".into()),
                        ],
                    },
                    name: RouteName::TaskStatus,
                },
            ],
        }
    }

    pub fn with_route(mut self, pattern: &str, name: RouteName) -> Result<Self, RouteError> {
        self.entries.push(RouteEntry {
            pattern: Pattern::parse(pattern)?,
            name,
        });
        Ok(self)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        let parts = split_path(path)?;
        self.entries.iter().find_map(|entry| {
            entry
                .pattern
                .matches(&parts)
                .map(|params| RouteMatch { entry, params })
        })
    }

    pub fn resolve(&self, path: &str) -> Route {
        match self.match_path(path) {
            Some(m) => Route::from_match(m.entry.name, m.params, path),
            None => Route::NotFound {
                path: path.to_string(),
            },
        }
    }
}

fn split_path(path: &str) -> Option<Vec<&str>> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path[..end].strip_prefix('/')?;
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Some(Vec::new());
    }
    Some(path.split('/').collect())
}

fn decode_segment(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| raw.to_string())
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-encodes everything outside the unreserved set.
pub fn encode_segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> Route {
        Route::TaskStatus { id: id.into() }
    }

    #[test]
    fn root_resolves_to_service_page() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/"), Route::Service);
        let m = table.match_path("/").expect("match");
        assert_eq!(m.entry.name, RouteName::ServicePage);
        assert!(m.params.is_empty());
    }

    #[test]
    fn task_id_is_captured_verbatim() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/tasks/42"), task("42"));
        assert_eq!(table.resolve("/tasks/abc-xyz"), task("abc-xyz"));
    }

    #[test]
    fn unknown_paths_are_explicitly_not_found() {
        let table = RouteTable::standard();
        for path in ["/does-not-exist", "/tasks", "/tasks/", "/tasks/a/b", "/tasks//", ""] {
            assert_eq!(
                table.resolve(path),
                Route::NotFound { path: path.into() },
                "path {path:?}"
            );
        }
    }

    #[test]
    fn query_fragment_and_trailing_slash_are_ignored() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/tasks/42/"), task("42"));
        assert_eq!(table.resolve("/tasks/42?tab=log"), task("42"));
        assert_eq!(table.resolve("/#top"), Route::Service);
        assert_eq!(table.resolve("/?x=1"), Route::Service);
    }

    #[test]
    fn params_are_percent_decoded_and_reencoded() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/tasks/a%20b"), task("a b"));
        assert_eq!(table.resolve("/tasks/100%"), task("100%"));
        assert_eq!(task("a b").path(), "/tasks/a%20b");
        assert_eq!(table.resolve(&task("x/y?").path()), task("x/y?"));
    }

    #[test]
    fn standard_table_matches_parsed_patterns() {
        let table = RouteTable::standard();
        let parsed = RouteTable::new()
            .with_route("/", RouteName::ServicePage)
            .and_then(|t| t.with_route("/tasks/:id", RouteName::TaskStatus))
            .expect("parse");
        for (a, b) in table.entries().iter().zip(parsed.entries()) {
            assert_eq!(a.pattern, b.pattern);
            assert_eq!(a.name, b.name);
        }
    }

    #[test]
    fn first_matching_entry_wins() {
        let table = RouteTable::new()
            .with_route("/tasks/:id", RouteName::TaskStatus)
            .and_then(|t| t.with_route("/tasks/new", RouteName::ServicePage))
            .expect("parse");
        assert_eq!(table.resolve("/tasks/new"), task("new"));
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        assert_eq!(
            Pattern::parse("tasks"),
            Err(RouteError::MissingLeadingSlash("tasks".into()))
        );
        assert_eq!(
            Pattern::parse("/tasks/:"),
            Err(RouteError::EmptyParamName("/tasks/:".into()))
        );
        assert_eq!(
            Pattern::parse("/a//b"),
            Err(RouteError::EmptySegment("/a//b".into()))
        );
        assert!(matches!(
            Pattern::parse("/:id/:id"),
            Err(RouteError::DuplicateParam { .. })
        ));
    }
}
