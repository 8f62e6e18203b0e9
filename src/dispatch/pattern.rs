//! Path pattern parsing and matching.
//!
//! # Responsibilities
//! - Parse patterns with `{name}` placeholders into segments
//! - Match concrete paths exactly, segment for segment
//! - Capture placeholder segments under their names
//!
//! # Design Decisions
//! - Exact segment count; no prefix or wildcard semantics
//! - No regex; matching is a single pass over the segments
//! - Placeholder names must be unique within a pattern

use crate::dispatch::context::PathParams;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern such as `/modules/{name}/start`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern.
    ///
    /// Panics on an empty or duplicate placeholder name; patterns are
    /// written once at server construction, so a malformed pattern is a
    /// programming error, not a runtime condition.
    pub fn parse(pattern: &str) -> Self {
        let mut segments = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for part in pattern.split('/').filter(|p| !p.is_empty()) {
            match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) => {
                    if name.is_empty() {
                        panic!("empty placeholder in route pattern {pattern}");
                    }
                    if !seen.insert(name.to_string()) {
                        panic!("duplicate placeholder ({name}) in route pattern {pattern}");
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// Match a concrete path, returning captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }
        Some(params)
    }

    /// The pattern as written at registration.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}
