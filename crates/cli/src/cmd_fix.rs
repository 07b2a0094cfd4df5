// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fix command implementation: the batch driver.
//!
//! Builds the file list from CLI paths, the config's file list, and the
//! files named by explicit targets, then processes each file
//! independently. No failure in one file aborts the rest.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use termcolor::{ColorSpec, StandardStream, WriteColor};

use squelch::cli::{Cli, FixArgs, OutputFormat};
use squelch::color::{self, scheme};
use squelch::config::{self, Config};
use squelch::editor::{self, EditOptions, FileReport, FileStatus};
use squelch::error::ExitCode;
use squelch::housekeeping::{self, EnsureOutcome, EnsuredDir};
use squelch::walker;

/// Aggregate result of one batch, also the JSON output shape.
#[derive(Debug, Serialize)]
struct BatchReport {
    files: Vec<FileReport>,
    failures: Vec<FailureReport>,
    ensured: Vec<EnsuredDir>,
    fixed: usize,
    unchanged: usize,
    skipped: usize,
    failed: usize,
    dry_run: bool,
}

#[derive(Debug, Serialize)]
struct FailureReport {
    path: PathBuf,
    error: String,
}

/// Run the fix command.
pub fn run(cli: &Cli, args: &FixArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config_path = config::resolve_config(cli.config.as_deref(), &cwd)?;

    let (config, root) = match &config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let root = path.parent().map_or_else(|| cwd.clone(), PathBuf::from);
            (config::load(path)?, root)
        }
        None => {
            tracing::debug!("no config found, using defaults");
            (Config::default(), cwd.clone())
        }
    };

    let rules = config.ruleset()?;
    let targets = config.targets_by_file(&root);

    let mut files = walker::expand_paths(&args.paths)?;
    files.extend(config.resolved_files(&root));
    files.extend(targets.keys().cloned());
    files.sort();
    files.dedup();

    let options = EditOptions {
        dry_run: args.dry_run,
    };

    let mut reports = Vec::with_capacity(files.len());
    let mut failures = Vec::new();

    for path in &files {
        let file_targets = targets.get(path).map_or(&[][..], Vec::as_slice);
        match editor::fix_file(path, file_targets, &rules, options) {
            Ok(report) => reports.push(report),
            Err(e) => failures.push(FailureReport {
                path: path.clone(),
                error: e.to_string(),
            }),
        }
    }

    let ensured = if args.dry_run {
        Vec::new()
    } else {
        housekeeping::ensure_dirs(&root, &config.ensure.dirs)?
    };

    let report = BatchReport {
        fixed: count_status(&reports, FileStatus::Fixed),
        unchanged: count_status(&reports, FileStatus::Unchanged),
        skipped: count_status(&reports, FileStatus::Missing),
        failed: failures.len(),
        files: reports,
        failures,
        ensured,
        dry_run: args.dry_run,
    };

    match args.output {
        OutputFormat::Text => print_text(&report, args)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.failed > 0 {
        Ok(ExitCode::FixFailed)
    } else {
        Ok(ExitCode::Success)
    }
}

fn count_status(reports: &[FileReport], status: FileStatus) -> usize {
    reports.iter().filter(|r| r.status == status).count()
}

fn print_text(report: &BatchReport, args: &FixArgs) -> anyhow::Result<()> {
    let choice = color::resolve_color(args.color, args.no_color);
    let mut out = StandardStream::stdout(choice);

    for file in &report.files {
        match file.status {
            FileStatus::Fixed => {
                status(&mut out, "fixed", &scheme::fixed())?;
                path(&mut out, file)?;
                writeln!(
                    out,
                    " ({} inserted, {} updated){}",
                    file.inserted,
                    file.updated,
                    if report.dry_run { " [dry-run]" } else { "" }
                )?;
            }
            FileStatus::Unchanged => {
                if args.verbose {
                    status(&mut out, "ok", &ColorSpec::new())?;
                    path(&mut out, file)?;
                    writeln!(out, " (no changes)")?;
                }
            }
            FileStatus::Missing => {
                status(&mut out, "skip", &scheme::skip())?;
                path(&mut out, file)?;
                writeln!(out, " (not found)")?;
            }
        }

        for target in file.out_of_range() {
            out.set_color(&scheme::line_number())?;
            write!(out, "  warn")?;
            out.reset()?;
            writeln!(out, ": target line {} out of range", target.line)?;
        }
    }

    for failure in &report.failures {
        status(&mut out, "error", &scheme::error())?;
        writeln!(out, "{}: {}", failure.path.display(), failure.error)?;
    }

    for dir in &report.ensured {
        if dir.outcome == EnsureOutcome::Created {
            status(&mut out, "created", &scheme::fixed())?;
            writeln!(out, "{}", dir.path.display())?;
        }
    }

    let total = report.files.len();
    writeln!(
        out,
        "fixed {} of {} file(s){}",
        report.fixed,
        total,
        if report.dry_run { " [dry-run]" } else { "" }
    )?;

    Ok(())
}

fn status(out: &mut StandardStream, word: &str, spec: &ColorSpec) -> anyhow::Result<()> {
    out.set_color(spec)?;
    write!(out, "{word:<7} ")?;
    out.reset()?;
    Ok(())
}

fn path(out: &mut StandardStream, file: &FileReport) -> anyhow::Result<()> {
    out.set_color(&scheme::path())?;
    write!(out, "{}", file.path.display())?;
    out.reset()?;
    Ok(())
}
