// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! phpcs:ignore marker detection and qualifier-list handling.
//!
//! This is deliberately a line heuristic, not a PHP comment parser: a line
//! "carries the marker" when it contains the `phpcs:ignore` substring
//! anywhere. Both annotators route every marker decision through here so
//! the heuristic lives (and is tested) in exactly one place.

use memchr::memmem;

/// Substring identifying a line as a suppression annotation.
pub const MARKER: &str = "phpcs:ignore";

/// Comment leader used when synthesizing annotation lines.
pub const COMMENT_LEADER: &str = "//";

/// Separator between the qualifier list and the free-text reason.
const REASON_SEPARATOR: &str = " -- ";

/// True when the line carries the recognized marker substring.
pub fn has_marker(line: &str) -> bool {
    memmem::find(line.as_bytes(), MARKER.as_bytes()).is_some()
}

/// The leading whitespace run of a line.
pub fn indent_of(line: &str) -> &str {
    let end = line
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(line.len());
    &line[..end]
}

/// A parsed (or synthesized) annotation line: indentation, an ordered
/// deduplicated qualifier list, and an optional trailing explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Leading whitespace copied from the annotated line.
    pub indent: String,
    qualifiers: Vec<String>,
    /// Free-text explanation after ` -- `.
    pub reason: Option<String>,
}

impl Annotation {
    /// An empty annotation with the given indentation.
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            qualifiers: Vec::new(),
            reason: None,
        }
    }

    /// Build from an annotation spec string such as
    /// `"WordPress.DB.DirectDatabaseQuery.DirectQuery -- Custom table query"`.
    pub fn from_spec(indent: &str, spec: &str) -> Self {
        let mut annotation = Self::new(indent);
        annotation.absorb(spec);
        annotation
    }

    /// Parse a line suspected of being an annotation line. Returns `None`
    /// when the marker substring is absent.
    pub fn parse_line(line: &str) -> Option<Self> {
        let at = memmem::find(line.as_bytes(), MARKER.as_bytes())?;
        let mut annotation = Self::new(indent_of(line));
        annotation.absorb(&line[at + MARKER.len()..]);
        Some(annotation)
    }

    /// Split `text` once on ` -- ` into a comma-separated qualifier
    /// segment and a trailing reason, folding both into `self`.
    fn absorb(&mut self, text: &str) {
        let (qualifier_segment, reason) = match text.split_once(REASON_SEPARATOR) {
            Some((left, right)) => (left, Some(right.trim().to_string())),
            None => (text, None),
        };
        for qualifier in qualifier_segment.split(',') {
            let qualifier = qualifier.trim();
            if !qualifier.is_empty() {
                self.push_qualifier(qualifier);
            }
        }
        if reason.as_deref().is_some_and(|r| !r.is_empty()) {
            self.reason = reason;
        }
    }

    /// The qualifier tokens, first-seen order.
    pub fn qualifiers(&self) -> &[String] {
        &self.qualifiers
    }

    /// Whether `qualifier` is already listed.
    pub fn has_qualifier(&self, qualifier: &str) -> bool {
        self.qualifiers.iter().any(|q| q == qualifier)
    }

    /// Append a qualifier unless already present. Returns true when the
    /// list changed.
    pub fn push_qualifier(&mut self, qualifier: &str) -> bool {
        if self.has_qualifier(qualifier) {
            return false;
        }
        self.qualifiers.push(qualifier.to_string());
        true
    }

    /// Rebuild the annotation line:
    /// `<indent>// phpcs:ignore Q1, Q2 -- reason`.
    pub fn render(&self) -> String {
        let mut line = format!("{}{} {}", self.indent, COMMENT_LEADER, MARKER);
        if !self.qualifiers.is_empty() {
            line.push(' ');
            line.push_str(&self.qualifiers.join(", "));
        }
        if let Some(reason) = &self.reason {
            line.push_str(REASON_SEPARATOR);
            line.push_str(reason);
        }
        line
    }
}

#[cfg(test)]
#[path = "annotation_tests.rs"]
mod tests;
