// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! PHP file discovery for directory arguments.
//!
//! Files given on the command line are taken as-is; directories are
//! expanded to the `.php` files beneath them, respecting gitignore and
//! skipping hidden entries. Results are sorted for deterministic batch
//! order.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{Error, Result};

/// Expand a mixed list of files and directories into concrete files.
pub fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            collect_php_files(path, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn collect_php_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in WalkBuilder::new(dir).build() {
        let entry = entry.map_err(|e| Error::Walk {
            message: e.to_string(),
        })?;
        if entry.file_type().is_some_and(|t| t.is_file()) && is_php(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(())
}

fn is_php(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("php"))
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
