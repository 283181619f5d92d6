//! Rewrite rule matching.
//!
//! # Responsibilities
//! - Match a request path, split into segments, against a rule pattern
//! - Capture `{name}` segments as query vars
//! - Attach fixed query vars to a matched rule (e.g. `donate=1`)
//!
//! # Design Decisions
//! - Segment-by-segment comparison, exact length; no regex
//! - Literal segments are case-sensitive
//! - Empty segments (double or trailing slashes) are ignored by the caller

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(String),
}

/// A path pattern that maps pretty URLs to query vars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    segments: Vec<Segment>,
    vars: Vec<(String, String)>,
}

impl RewriteRule {
    /// Parse a pattern such as `campaigns/{campaign}/donate`.
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => Segment::Capture(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();

        Self {
            segments,
            vars: Vec::new(),
        }
    }

    /// Set a fixed query var whenever this rule matches.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((name.into(), value.into()));
        self
    }

    /// Returns the query vars produced by this rule if `segments` match it.
    pub fn matches(&self, segments: &[&str]) -> Option<BTreeMap<String, String>> {
        if segments.len() != self.segments.len() {
            return None;
        }

        let mut vars = BTreeMap::new();
        for (pattern, actual) in self.segments.iter().zip(segments) {
            match pattern {
                Segment::Literal(expected) if expected.as_str() == *actual => {}
                Segment::Literal(_) => return None,
                Segment::Capture(name) => {
                    vars.insert(name.clone(), (*actual).to_string());
                }
            }
        }

        for (name, value) in &self.vars {
            vars.insert(name.clone(), value.clone());
        }
        Some(vars)
    }
}
