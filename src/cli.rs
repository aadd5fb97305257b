//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Positional roots override `<source_root>`/`<target_root>` from config.xml.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::OnError;

/// Move a submission from a staging directory into its final location.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move submission files from a staging root into a target root"
)]
pub struct Args {
    /// Staging directory the submission currently lives under.
    #[arg(value_name = "SOURCE_ROOT", value_hint = ValueHint::DirPath)]
    pub source_root: Option<PathBuf>,

    /// Final directory; relative layout below SOURCE_ROOT is reproduced here.
    #[arg(value_name = "TARGET_ROOT", value_hint = ValueHint::DirPath)]
    pub target_root: Option<PathBuf>,

    /// Move only these files (absolute, or relative to SOURCE_ROOT) instead of the whole tree.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        help = "Move only this file (repeatable); relative paths are taken under SOURCE_ROOT"
    )]
    pub files: Vec<PathBuf>,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Stop after the first file that fails.
    #[arg(long, help = "Stop after the first failed file; remaining files are skipped")]
    pub fail_fast: bool,

    #[arg(long, help = "Move files concurrently")]
    pub parallel: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Append logs to this file in addition to stdout.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where submission_move will look for the config file, then exit.
    #[arg(long, help = "Print the config file location in use and exit")]
    pub print_config: bool,

    /// Write a commented template config file, then exit.
    #[arg(long, help = "Write a template config file and exit")]
    pub init_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source_root {
            cfg.source_root = Some(src.clone());
        }
        if let Some(tgt) = &self.target_root {
            cfg.target_root = Some(tgt.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.fail_fast {
            cfg.on_error = OnError::Abort;
        }
        if self.parallel {
            cfg.parallel = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
