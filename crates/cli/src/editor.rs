// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-file edit pipeline: read, transform in memory, write back.
//!
//! One file is one unit of work. The buffer is only serialized and
//! written after the whole transform succeeds; a failure mid-transform
//! leaves the file untouched. Files are independent: no state survives
//! from one file to the next.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::buffer::TextBuffer;
use crate::error::{Error, Result};
use crate::explicit::{self, AppliedTarget, ExplicitTarget, TargetOutcome};
use crate::rules::{Ruleset, ScanStats};

/// Maximum file size to read (10MB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// How one file ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Annotations were inserted or updated and written back.
    Fixed,
    /// No target or rule touched the file; nothing written.
    Unchanged,
    /// The path does not exist; skipped, not fatal to the batch.
    Missing,
}

/// Result of processing one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    /// Annotation lines newly inserted (targets + rules).
    pub inserted: usize,
    /// Existing annotation lines overwritten or extended.
    pub updated: usize,
    /// Per-target outcomes, in descending-line application order.
    pub targets: Vec<AppliedTarget>,
}

impl FileReport {
    fn skipped(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            status: FileStatus::Missing,
            inserted: 0,
            updated: 0,
            targets: Vec::new(),
        }
    }

    /// Targets that addressed lines beyond the buffer.
    pub fn out_of_range(&self) -> impl Iterator<Item = &AppliedTarget> {
        self.targets
            .iter()
            .filter(|t| t.outcome == TargetOutcome::OutOfRange)
    }
}

/// Knobs for one edit pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditOptions {
    /// Transform but do not write.
    pub dry_run: bool,
}

/// Apply explicit targets then pattern rules to one file.
pub fn fix_file(
    path: &Path,
    targets: &[ExplicitTarget],
    rules: &Ruleset,
    options: EditOptions,
) -> Result<FileReport> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "file not found, skipping");
        return Ok(FileReport::skipped(path));
    }

    let text = read_text(path)?;
    let mut buffer = TextBuffer::parse(&text);

    let applied = explicit::apply_targets(&mut buffer, targets);
    let stats = rules.apply(&mut buffer);

    let (inserted, updated) = tally(&applied, stats);
    let status = if inserted + updated == 0 {
        FileStatus::Unchanged
    } else {
        // Serialize fully before any write; write-back is all-or-nothing.
        let rendered = buffer.render();
        if !options.dry_run {
            fs::write(path, rendered).map_err(|e| Error::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        FileStatus::Fixed
    };

    Ok(FileReport {
        path: path.to_path_buf(),
        status,
        inserted,
        updated,
        targets: applied,
    })
}

fn tally(applied: &[AppliedTarget], stats: ScanStats) -> (usize, usize) {
    let mut inserted = stats.inserted;
    let mut updated = stats.updated;
    for target in applied {
        match target.outcome {
            TargetOutcome::Inserted => inserted += 1,
            TargetOutcome::Updated => updated += 1,
            TargetOutcome::OutOfRange => {}
        }
    }
    (inserted, updated)
}

/// Size-gated full read, decoded as UTF-8.
fn read_text(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let size = metadata.len();
    if size > MAX_FILE_SIZE {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: MAX_FILE_SIZE,
        });
    }

    let bytes = fs::read(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
