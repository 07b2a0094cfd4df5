// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern-rule annotation: call-site triggers with bounded context.
//!
//! Rules run in a single forward pass over the buffer. Context for a rule
//! is limited to the triggering line, one line of lookahead, one line of
//! lookback (the previous output line), and for proximity rules a bounded
//! byte window around the line's offset in the whole buffer. Matching is
//! textual and best-effort; nothing here parses PHP.

use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::Serialize;

use crate::annotation::{self, Annotation};
use crate::buffer::TextBuffer;
use crate::error::{Error, Result};

/// Qualifier added when a query line looks string-interpolated.
pub const INTERPOLATED_QUALIFIER: &str = "WordPress.DB.PreparedSQL.InterpolatedNotPrepared";

/// Default byte window for proximity (`near`) rules.
pub const DEFAULT_NEAR_WINDOW: usize = 200;

/// Substrings suggesting SQL built by string interpolation.
const INTERPOLATION_MARKS: &[&str] = &["{$", "\"SELECT"];

const DIRECT_QUERY: &str = "WordPress.DB.DirectDatabaseQuery.DirectQuery";
const NO_CACHING: &str = "WordPress.DB.DirectDatabaseQuery.NoCaching";

/// A (trigger, builder) pair: a regex over a single line, the qualifiers
/// to guarantee, and the reason text for synthesized annotations.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub name: String,
    trigger: Regex,
    qualifiers: Vec<String>,
    reason: String,
    interpolation: bool,
    near: Option<Near>,
}

#[derive(Debug, Clone)]
struct Near {
    needle: String,
    window: usize,
}

impl PatternRule {
    /// Compile a rule. Invalid trigger regexes are config errors.
    pub fn new(
        name: impl Into<String>,
        trigger: &str,
        qualifiers: &[&str],
        reason: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let trigger = Regex::new(trigger).map_err(|e| Error::Config {
            message: format!("rule '{name}': invalid trigger regex: {e}"),
            path: None,
        })?;
        Ok(Self {
            name,
            trigger,
            qualifiers: qualifiers.iter().map(|q| q.to_string()).collect(),
            reason: reason.into(),
            interpolation: false,
            near: None,
        })
    }

    /// Also guarantee the interpolation qualifier when the triggering
    /// line (or its lookahead line) looks string-interpolated.
    pub fn with_interpolation(mut self) -> Self {
        self.interpolation = true;
        self
    }

    /// Require `needle` within `window` bytes of the line's offset in the
    /// whole buffer. Covers multi-line trigger phrases without parsing.
    pub fn with_near(mut self, needle: impl Into<String>, window: usize) -> Self {
        self.near = Some(Near {
            needle: needle.into(),
            window,
        });
        self
    }

    fn matches(&self, ctx: &LineContext<'_>) -> bool {
        if !self.trigger.is_match(ctx.line) {
            return false;
        }
        match &self.near {
            None => true,
            Some(near) => ctx.window_contains(&near.needle, near.window),
        }
    }
}

/// Per-line context handed to rule triggers.
struct LineContext<'a> {
    line: &'a str,
    next: Option<&'a str>,
    /// Byte offset of the line start in `content`.
    offset: usize,
    content: &'a str,
}

impl LineContext<'_> {
    fn window_contains(&self, needle: &str, window: usize) -> bool {
        let start = self.offset.saturating_sub(window);
        let end = (self.offset + self.line.len() + window).min(self.content.len());
        memchr::memmem::find(&self.content.as_bytes()[start..end], needle.as_bytes()).is_some()
    }
}

/// Counts from one pattern pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// New annotation lines emitted.
    pub inserted: usize,
    /// Existing annotation lines that gained qualifiers.
    pub updated: usize,
}

/// An ordered rule set plus the shared interpolation matcher.
///
/// Rule order is priority order: the first rule whose trigger fires on a
/// line annotates it, and later rules do not stack on the same line.
#[derive(Debug)]
pub struct Ruleset {
    rules: Vec<PatternRule>,
    interpolation_marks: AhoCorasick,
}

impl Ruleset {
    pub fn new(rules: Vec<PatternRule>) -> Result<Self> {
        let interpolation_marks = AhoCorasick::new(INTERPOLATION_MARKS)
            .map_err(|e| Error::Internal(format!("interpolation matcher: {e}")))?;
        Ok(Self {
            rules,
            interpolation_marks,
        })
    }

    /// The built-in WordPress direct-database-query rule set.
    pub fn wordpress_db() -> Result<Self> {
        let table_reason = "Custom table, no WP equivalent";
        let query_reason = "Custom table query";
        let rules = vec![
            PatternRule::new(
                "wpdb-insert",
                r"\$result = \$wpdb->insert\(",
                &[DIRECT_QUERY],
                table_reason,
            )?
            .with_interpolation(),
            PatternRule::new(
                "wpdb-update",
                r"\$result = \$wpdb->update\(",
                &[DIRECT_QUERY, NO_CACHING],
                table_reason,
            )?
            .with_interpolation(),
            PatternRule::new(
                "wpdb-delete",
                r"\$result = \$wpdb->delete\(",
                &[DIRECT_QUERY, NO_CACHING],
                table_reason,
            )?
            .with_interpolation(),
            PatternRule::new(
                "wpdb-get-results",
                r"\$results = \$wpdb->get_results\(",
                &[DIRECT_QUERY, NO_CACHING],
                query_reason,
            )?
            .with_interpolation(),
            PatternRule::new(
                "wpdb-get-var",
                r"\$\w+ = \$wpdb->get_var\(",
                &[DIRECT_QUERY, NO_CACHING],
                query_reason,
            )?
            .with_interpolation(),
            PatternRule::new(
                "wpdb-get-row",
                r"\$\w+ = \$wpdb->get_row\(",
                &[DIRECT_QUERY, NO_CACHING],
                query_reason,
            )?
            .with_interpolation(),
            PatternRule::new(
                "wpdb-get-col",
                r"\$\w+ = \$wpdb->get_col\(",
                &[DIRECT_QUERY, NO_CACHING],
                query_reason,
            )?
            .with_interpolation(),
            PatternRule::new(
                "wp-query-post-not-in",
                r"get_posts\(",
                &["WordPressVIPMinimum.Performance.WPQueryParams.PostNotIn_post__not_in"],
                "Necessary for excluding current post",
            )?
            .with_near("post__not_in", DEFAULT_NEAR_WINDOW),
        ];
        Self::new(rules)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// One forward pass over the buffer.
    ///
    /// A triggered line whose previous output line lacks the marker gets a
    /// synthesized annotation above it; one that already has a marker line
    /// gets any missing qualifiers appended to that line instead.
    pub fn apply(&self, buffer: &mut TextBuffer) -> ScanStats {
        let mut stats = ScanStats::default();
        if self.rules.is_empty() || buffer.is_empty() {
            return stats;
        }

        // Offsets index into the pre-pass rendering; proximity windows are
        // evaluated against the original buffer, not interleaved edits.
        let content = buffer.render();
        let newline_len = buffer.newline().as_str().len();

        let mut out: Vec<String> = Vec::with_capacity(buffer.len() + 8);
        let mut offset = 0usize;

        for (i, line) in buffer.lines().iter().enumerate() {
            let ctx = LineContext {
                line,
                next: buffer.lines().get(i + 1).map(String::as_str),
                offset,
                content: &content,
            };
            offset += line.len() + newline_len;

            let Some(rule) = self.rules.iter().find(|r| r.matches(&ctx)) else {
                out.push(line.clone());
                continue;
            };
            tracing::debug!(rule = %rule.name, line = i + 1, "trigger fired");

            let interpolated = rule.interpolation && self.looks_interpolated(&ctx);

            let prev_annotated = out.last().is_some_and(|prev| annotation::has_marker(prev));
            if prev_annotated {
                let idx = out.len() - 1;
                if let Some(mut existing) = Annotation::parse_line(&out[idx]) {
                    let mut changed = false;
                    for qualifier in &rule.qualifiers {
                        changed |= existing.push_qualifier(qualifier);
                    }
                    if interpolated {
                        changed |= existing.push_qualifier(INTERPOLATED_QUALIFIER);
                    }
                    if changed {
                        out[idx] = existing.render();
                        stats.updated += 1;
                    }
                }
                out.push(line.clone());
            } else {
                let mut fresh = Annotation::new(annotation::indent_of(line));
                for qualifier in &rule.qualifiers {
                    fresh.push_qualifier(qualifier);
                }
                if interpolated {
                    fresh.push_qualifier(INTERPOLATED_QUALIFIER);
                }
                fresh.reason = Some(rule.reason.clone());
                out.push(fresh.render());
                out.push(line.clone());
                stats.inserted += 1;
            }
        }

        buffer.set_lines(out);
        stats
    }

    fn looks_interpolated(&self, ctx: &LineContext<'_>) -> bool {
        self.interpolation_marks.is_match(ctx.line)
            || ctx
                .next
                .is_some_and(|next| self.interpolation_marks.is_match(next))
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
