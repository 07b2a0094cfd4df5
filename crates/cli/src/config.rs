// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! squelch.toml parsing, validation, and discovery.
//!
//! The config carries the batch plan: explicit `[[target]]` entries,
//! `[[rule]]` pattern entries, the default file list, and placeholder
//! directories to ensure. Discovery walks from the start directory up to
//! the git root looking for `squelch.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::explicit::ExplicitTarget;
use crate::rules::{DEFAULT_NEAR_WINDOW, PatternRule, Ruleset};

/// Config file name looked up during discovery.
pub const CONFIG_FILE_NAME: &str = "squelch.toml";

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Files the batch processes even when no PATH argument names them.
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Use the built-in WordPress DB rule set when no [[rule]] entries
    /// are given (default: true).
    #[serde(default = "default_true")]
    pub default_rules: bool,

    /// Explicit (file, line, annotation) targets.
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetEntry>,

    /// Pattern rules, in priority order.
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleEntry>,

    /// Housekeeping directories.
    #[serde(default)]
    pub ensure: EnsureConfig,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            files: Vec::new(),
            default_rules: true,
            targets: Vec::new(),
            rules: Vec::new(),
            ensure: EnsureConfig::default(),
        }
    }
}

/// One explicit target: a file, a 1-based line, and an annotation spec.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetEntry {
    pub file: PathBuf,
    pub line: usize,
    pub annotation: String,
}

/// One pattern rule entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    pub name: String,
    /// Regex evaluated against single lines.
    pub trigger: String,
    #[serde(default)]
    pub qualifiers: Vec<String>,
    #[serde(default)]
    pub reason: String,
    /// Add the PreparedSQL interpolation qualifier when the line looks
    /// string-interpolated.
    #[serde(default)]
    pub interpolation: bool,
    /// Require this substring near the triggering line.
    #[serde(default)]
    pub near: Option<String>,
    /// Byte window for `near` (default: 200).
    #[serde(default)]
    pub near_window: Option<usize>,
}

impl RuleEntry {
    fn compile(&self) -> Result<PatternRule> {
        let qualifiers: Vec<&str> = self.qualifiers.iter().map(String::as_str).collect();
        let mut rule = PatternRule::new(&self.name, &self.trigger, &qualifiers, &self.reason)?;
        if self.interpolation {
            rule = rule.with_interpolation();
        }
        if let Some(needle) = &self.near {
            rule = rule.with_near(needle, self.near_window.unwrap_or(DEFAULT_NEAR_WINDOW));
        }
        Ok(rule)
    }
}

/// Housekeeping configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnsureConfig {
    /// Directories created (with a `.gitkeep` placeholder) if absent.
    #[serde(default)]
    pub dirs: Vec<PathBuf>,
}

impl Config {
    /// Compile the effective rule set: config rules in priority order, or
    /// the built-in WordPress DB set when none are given.
    pub fn ruleset(&self) -> Result<Ruleset> {
        if self.rules.is_empty() {
            return if self.default_rules {
                Ruleset::wordpress_db()
            } else {
                Ruleset::new(Vec::new())
            };
        }
        let mut rules = Vec::with_capacity(self.rules.len());
        for entry in &self.rules {
            rules.push(entry.compile()?);
        }
        Ruleset::new(rules)
    }

    /// Group explicit targets by file, paths resolved against `root`.
    pub fn targets_by_file(&self, root: &Path) -> BTreeMap<PathBuf, Vec<ExplicitTarget>> {
        let mut grouped: BTreeMap<PathBuf, Vec<ExplicitTarget>> = BTreeMap::new();
        for entry in &self.targets {
            grouped
                .entry(resolve(root, &entry.file))
                .or_default()
                .push(ExplicitTarget::new(entry.line, &entry.annotation));
        }
        grouped
    }

    /// The config's default file list, resolved against `root`.
    pub fn resolved_files(&self, root: &Path) -> Vec<PathBuf> {
        self.files.iter().map(|f| resolve(root, f)).collect()
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Load and validate a config file.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Version gate first, for a clear message on old/foreign files.
    let version: VersionOnly = toml::from_str(&content).map_err(|e| Error::Config {
        message: format!("invalid TOML: {e}"),
        path: Some(path.to_path_buf()),
    })?;
    match version.version {
        None => {
            return Err(Error::Config {
                message: "missing 'version' field (expected version = 1)".to_string(),
                path: Some(path.to_path_buf()),
            });
        }
        Some(1) => {}
        Some(v) => {
            return Err(Error::Config {
                message: format!("unsupported config version {v} (expected 1)"),
                path: Some(path.to_path_buf()),
            });
        }
    }

    toml::from_str(&content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

/// Find squelch.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Resolve config path from CLI arg, env var, or discovery.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            if path.exists() {
                Ok(Some(path.to_path_buf()))
            } else {
                Err(Error::Config {
                    message: format!("config file not found: {}", path.display()),
                    path: Some(path.to_path_buf()),
                })
            }
        }
        None => Ok(find_config(cwd)),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
