// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use tempfile::TempDir;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        r#"
version = 1
files = ["includes/class-redirects.php"]

[[target]]
file = "includes/class-api.php"
line = 617
annotation = "WordPress.DB.DirectDatabaseQuery.DirectQuery -- Custom table query"

[[rule]]
name = "wpdb-get-var"
trigger = '\$\w+ = \$wpdb->get_var\('
qualifiers = ["WordPress.DB.DirectDatabaseQuery.DirectQuery"]
reason = "Custom table query"
interpolation = true

[ensure]
dirs = ["languages"]
"#,
    );

    let config = load(&path).unwrap();
    assert_eq!(config.version, 1);
    assert_eq!(config.files.len(), 1);
    assert_eq!(config.targets.len(), 1);
    assert_eq!(config.targets[0].line, 617);
    assert_eq!(config.rules.len(), 1);
    assert!(config.rules[0].interpolation);
    assert_eq!(config.ensure.dirs, [PathBuf::from("languages")]);
}

#[test]
fn missing_version_is_a_config_error() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "files = []\n");

    let err = load(&path).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(err.to_string().contains("version"));
}

#[test]
fn unsupported_version_is_a_config_error() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "version = 2\n");

    let err = load(&path).unwrap_err();
    assert!(err.to_string().contains("unsupported config version 2"));
}

#[test]
fn invalid_toml_is_a_config_error() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "version = \n");

    assert!(matches!(load(&path).unwrap_err(), Error::Config { .. }));
}

#[test]
fn bad_rule_regex_fails_compilation_with_rule_name() {
    let config = Config {
        rules: vec![RuleEntry {
            name: "broken".to_string(),
            trigger: "(oops".to_string(),
            qualifiers: Vec::new(),
            reason: String::new(),
            interpolation: false,
            near: None,
            near_window: None,
        }],
        ..Config::default()
    };

    let err = config.ruleset().unwrap_err();
    assert!(err.to_string().contains("broken"));
}

#[test]
fn empty_rules_fall_back_to_builtin_set() {
    let config = Config::default();
    let ruleset = config.ruleset().unwrap();
    assert!(!ruleset.is_empty());
}

#[test]
fn default_rules_false_disables_builtin_set() {
    let config = Config {
        default_rules: false,
        ..Config::default()
    };
    assert!(config.ruleset().unwrap().is_empty());
}

#[test]
fn config_rules_replace_builtin_set() {
    let config = Config {
        rules: vec![RuleEntry {
            name: "only".to_string(),
            trigger: "foo".to_string(),
            qualifiers: vec!["A.B".to_string()],
            reason: "r".to_string(),
            interpolation: false,
            near: None,
            near_window: None,
        }],
        ..Config::default()
    };
    assert_eq!(config.ruleset().unwrap().len(), 1);
}

#[test]
fn targets_group_by_file_resolved_against_root() {
    let config = Config {
        targets: vec![
            TargetEntry {
                file: PathBuf::from("a.php"),
                line: 3,
                annotation: "X".to_string(),
            },
            TargetEntry {
                file: PathBuf::from("a.php"),
                line: 9,
                annotation: "Y".to_string(),
            },
            TargetEntry {
                file: PathBuf::from("b.php"),
                line: 1,
                annotation: "Z".to_string(),
            },
        ],
        ..Config::default()
    };

    let grouped = config.targets_by_file(Path::new("/repo"));
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[Path::new("/repo/a.php")].len(), 2);
    assert_eq!(grouped[Path::new("/repo/b.php")].len(), 1);
}

#[test]
fn discovery_walks_up_to_git_root() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join(".git")).unwrap();
    std::fs::create_dir_all(tmp.path().join("includes/deep")).unwrap();
    let config_path = write_config(tmp.path(), "version = 1\n");

    let found = find_config(&tmp.path().join("includes/deep")).unwrap();
    assert_eq!(found, config_path);
}

#[test]
fn discovery_stops_at_git_root() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("repo/.git")).unwrap();
    std::fs::create_dir_all(tmp.path().join("repo/src")).unwrap();
    // Config above the git root must not be picked up.
    write_config(tmp.path(), "version = 1\n");

    assert_eq!(find_config(&tmp.path().join("repo/src")), None);
}

#[test]
fn explicit_config_path_must_exist() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");

    let err = resolve_config(Some(&missing), tmp.path()).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}
