// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use clap::Parser;

#[test]
fn parses_fix_with_paths_and_flags() {
    let cli = Cli::try_parse_from(["squelch", "fix", "includes", "--dry-run", "-v"]).unwrap();
    let Some(Command::Fix(args)) = cli.command else {
        panic!("expected fix command");
    };
    assert_eq!(args.paths, [PathBuf::from("includes")]);
    assert!(args.dry_run);
    assert!(args.verbose);
    assert_eq!(args.output, OutputFormat::Text);
}

#[test]
fn parses_json_output_format() {
    let cli = Cli::try_parse_from(["squelch", "fix", "-o", "json"]).unwrap();
    let Some(Command::Fix(args)) = cli.command else {
        panic!("expected fix command");
    };
    assert_eq!(args.output, OutputFormat::Json);
}

#[test]
fn global_config_flag_applies_to_subcommands() {
    let cli = Cli::try_parse_from(["squelch", "fix", "-C", "custom.toml"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
}

#[test]
fn bare_invocation_parses_without_command() {
    let cli = Cli::try_parse_from(["squelch"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn init_accepts_force() {
    let cli = Cli::try_parse_from(["squelch", "init", "--force"]).unwrap();
    let Some(Command::Init(args)) = cli.command else {
        panic!("expected init command");
    };
    assert!(args.force);
}

#[test]
fn rejects_unknown_output_format() {
    assert!(Cli::try_parse_from(["squelch", "fix", "-o", "html"]).is_err());
}
