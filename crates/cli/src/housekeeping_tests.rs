// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use tempfile::TempDir;

#[test]
fn creates_missing_dir_with_placeholder() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("languages");

    let outcome = ensure_placeholder_dir(&dir).unwrap();
    assert_eq!(outcome, EnsureOutcome::Created);
    assert!(dir.is_dir());
    assert!(dir.join(".gitkeep").is_file());
}

#[test]
fn existing_dir_is_left_alone() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("languages");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("plugin-fr_FR.po"), "msgid").unwrap();

    let outcome = ensure_placeholder_dir(&dir).unwrap();
    assert_eq!(outcome, EnsureOutcome::Exists);
    // No placeholder added alongside real content.
    assert!(!dir.join(".gitkeep").exists());
}

#[test]
fn ensure_dirs_resolves_relative_to_root() {
    let tmp = TempDir::new().unwrap();
    let ensured = ensure_dirs(
        tmp.path(),
        &[PathBuf::from("languages"), PathBuf::from("assets/cache")],
    )
    .unwrap();

    assert_eq!(ensured.len(), 2);
    assert!(tmp.path().join("languages/.gitkeep").is_file());
    assert!(tmp.path().join("assets/cache/.gitkeep").is_file());
}
