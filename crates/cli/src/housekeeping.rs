// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Placeholder directory maintenance.
//!
//! Some linters warn when a directory named in plugin headers (e.g.
//! `languages/`) does not exist. `[ensure] dirs` creates each missing
//! directory with an empty `.gitkeep` so it survives version control.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};

/// Placeholder file dropped into created directories.
const PLACEHOLDER: &str = ".gitkeep";

/// Whether an ensured directory had to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsureOutcome {
    Created,
    Exists,
}

/// Per-directory housekeeping result.
#[derive(Debug, Clone, Serialize)]
pub struct EnsuredDir {
    pub path: PathBuf,
    pub outcome: EnsureOutcome,
}

/// Create `dir` (and a `.gitkeep` inside it) if absent.
pub fn ensure_placeholder_dir(dir: &Path) -> Result<EnsureOutcome> {
    if dir.exists() {
        return Ok(EnsureOutcome::Exists);
    }

    fs::create_dir_all(dir).map_err(|e| Error::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let placeholder = dir.join(PLACEHOLDER);
    fs::write(&placeholder, "").map_err(|e| Error::Io {
        path: placeholder,
        source: e,
    })?;

    Ok(EnsureOutcome::Created)
}

/// Ensure every configured directory, resolved against `root`.
pub fn ensure_dirs(root: &Path, dirs: &[PathBuf]) -> Result<Vec<EnsuredDir>> {
    let mut ensured = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let path = if dir.is_absolute() {
            dir.clone()
        } else {
            root.join(dir)
        };
        let outcome = ensure_placeholder_dir(&path)?;
        ensured.push(EnsuredDir { path, outcome });
    }
    Ok(ensured)
}

#[cfg(test)]
#[path = "housekeeping_tests.rs"]
mod tests;
