pub mod annotation;
pub mod buffer;
pub mod cli;
pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod explicit;
pub mod housekeeping;
pub mod rules;
pub mod walker;

pub use annotation::Annotation;
pub use buffer::{Newline, TextBuffer};
pub use cli::{Cli, Command, FixArgs, InitArgs, OutputFormat};
pub use config::Config;
pub use editor::{EditOptions, FileReport, FileStatus};
pub use error::{Error, ExitCode, Result};
pub use explicit::{AppliedTarget, ExplicitTarget, TargetOutcome};
pub use rules::{PatternRule, Ruleset, ScanStats};
