// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Implementation of the `squelch init` command.

use squelch::cli::InitArgs;
use squelch::config::CONFIG_FILE_NAME;
use squelch::error::ExitCode;

/// Starter configuration written by `squelch init`.
const TEMPLATE: &str = r#"version = 1

# Files processed on every run, relative to this file.
files = []

# Explicit targets: insert (or refresh) an annotation above a known line.
# [[target]]
# file = "includes/class-api.php"
# line = 617
# annotation = "WordPress.DB.DirectDatabaseQuery.DirectQuery -- Custom table query"

# Pattern rules, highest priority first. When none are given, the built-in
# WordPress direct-database-query rules apply. Set default_rules = false
# to run with no rules at all.
# [[rule]]
# name = "wpdb-get-var"
# trigger = '\$\w+ = \$wpdb->get_var\('
# qualifiers = ["WordPress.DB.DirectDatabaseQuery.DirectQuery"]
# reason = "Custom table query"
# interpolation = true

# Directories created with a .gitkeep placeholder if absent.
[ensure]
dirs = []
"#;

/// Run the `init` command to create a squelch.toml configuration file.
pub fn run(args: &InitArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() && !args.force {
        eprintln!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
        return Ok(ExitCode::ConfigError);
    }

    std::fs::write(&config_path, TEMPLATE)?;
    println!("Created {CONFIG_FILE_NAME}");

    Ok(ExitCode::Success)
}
