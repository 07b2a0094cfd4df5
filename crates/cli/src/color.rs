// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling for batch status output.
//!
//! Detection order: explicit CLI flags, then `NO_COLOR` / `COLOR` env
//! vars, then TTY and agent-environment auto-detection.

use std::io::IsTerminal;

use termcolor::{Color, ColorChoice, ColorSpec};

/// Resolve the color choice from flags and environment.
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` when set to any
/// value (including empty string) disables color.
pub fn resolve_color(force_color: bool, no_color: bool) -> ColorChoice {
    if let Some(choice) = flag_override(force_color, no_color) {
        return choice;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() || is_agent_environment() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// CLI flags beat the environment; `--no-color` beats `--color`.
pub fn flag_override(force_color: bool, no_color: bool) -> Option<ColorChoice> {
    if no_color {
        Some(ColorChoice::Never)
    } else if force_color {
        Some(ColorChoice::Always)
    } else {
        None
    }
}

/// Check if running in an AI agent environment.
fn is_agent_environment() -> bool {
    std::env::var_os("CLAUDE_CODE").is_some()
        || std::env::var_os("CODEX").is_some()
        || std::env::var_os("CURSOR").is_some()
        || std::env::var_os("CI").is_some()
}

/// Color scheme for per-file status lines.
pub mod scheme {
    use super::*;

    /// Green "fixed" indicator.
    pub fn fixed() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    /// Yellow "skip" indicator.
    pub fn skip() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
        spec
    }

    /// Red "error" indicator.
    pub fn error() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Cyan file path.
    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Yellow line number.
    pub fn line_number() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
