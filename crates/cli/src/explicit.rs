// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit line-number annotation targets.
//!
//! Targets address lines with pre-edit 1-based numbers. They are applied
//! highest line first: inserting above a line never shifts the numbering
//! of lines before it, so re-sorting makes caller order irrelevant.

use serde::Serialize;

use crate::annotation::{self, Annotation};
use crate::buffer::TextBuffer;

/// A caller-specified (line number, annotation text) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitTarget {
    /// 1-based line number in pre-edit numbering.
    pub line: usize,
    /// Annotation spec, e.g. `"Foo.Bar, Baz.Qux -- reason"`.
    pub annotation: String,
}

impl ExplicitTarget {
    pub fn new(line: usize, annotation: impl Into<String>) -> Self {
        Self {
            line,
            annotation: annotation.into(),
        }
    }
}

/// What happened to one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOutcome {
    /// A new annotation line was inserted above the target.
    Inserted,
    /// An existing annotation line above the target was overwritten.
    Updated,
    /// The line number exceeds the buffer length; target skipped.
    OutOfRange,
}

/// Per-target result, reported back to the batch driver.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedTarget {
    /// The target's 1-based line number as supplied.
    pub line: usize,
    pub outcome: TargetOutcome,
}

/// Apply explicit targets to a buffer, highest line number first.
///
/// Out-of-range targets are skipped; the rest are still applied.
pub fn apply_targets(buffer: &mut TextBuffer, targets: &[ExplicitTarget]) -> Vec<AppliedTarget> {
    let mut ordered: Vec<&ExplicitTarget> = targets.iter().collect();
    ordered.sort_by(|a, b| b.line.cmp(&a.line));

    ordered
        .into_iter()
        .map(|target| AppliedTarget {
            line: target.line,
            outcome: apply_one(buffer, target),
        })
        .collect()
}

fn apply_one(buffer: &mut TextBuffer, target: &ExplicitTarget) -> TargetOutcome {
    if target.line == 0 || target.line > buffer.len() {
        return TargetOutcome::OutOfRange;
    }
    let idx = target.line - 1;
    let Some(line) = buffer.line(idx) else {
        return TargetOutcome::OutOfRange;
    };

    let indent = annotation::indent_of(line).to_string();
    let rendered = Annotation::from_spec(&indent, &target.annotation).render();

    // Idempotence. The addressed line carrying the marker means the target
    // now points at an annotation line (same target applied again, or a
    // duplicate in this batch); a marker on the preceding line means an
    // earlier pass already annotated this line. Both overwrite.
    if annotation::has_marker(line) {
        buffer.replace(idx, rendered);
        TargetOutcome::Updated
    } else if idx > 0 && buffer.line(idx - 1).is_some_and(annotation::has_marker) {
        buffer.replace(idx - 1, rendered);
        TargetOutcome::Updated
    } else {
        buffer.insert(idx, rendered);
        TargetOutcome::Inserted
    }
}

#[cfg(test)]
#[path = "explicit_tests.rs"]
mod tests;
