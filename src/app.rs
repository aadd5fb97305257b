//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler, validates
//! the roots, and runs the batch mover.

use anyhow::{Context, Result, anyhow, bail};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use submission_move::cli::Args;
use submission_move::config::{CONFIG_ENV, create_template_config, load_config};
use submission_move::output as out;
use submission_move::{BatchReport, Config, default_config_path, move_files, move_submission, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handled before logging init
    if args.print_config {
        return print_config_location();
    }
    if args.init_config {
        let path = default_config_path()?;
        create_template_config(&path)?;
        out::print_success(&format!("A template config was written to: {}", path.display()));
        out::print_info("Edit `source_root` and `target_root` (or pass them as arguments), then re-run.");
        return Ok(());
    }

    // defaults < XML < CLI
    let mut cfg = match load_config()? {
        Some((_, cfg)) => cfg,
        None => Config::default(),
    };
    args.apply_overrides(&mut cfg);
    cfg.source_root = cfg.source_root.as_deref().map(absolutize).transpose()?;
    cfg.target_root = cfg.target_root.as_deref().map(absolutize).transpose()?;

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file and stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install interrupt handler")?;
    }

    debug!("Starting submission_move: {:?}", args);

    let result = run_moves(&args, &cfg);
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "submission_move failed");
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn run_moves(args: &Args, cfg: &Config) -> Result<()> {
    cfg.validate()?;
    let (Some(src), Some(tgt)) = (cfg.source_root.as_deref(), cfg.target_root.as_deref()) else {
        bail!("source_root and target_root must both be set");
    };
    let opts = cfg.move_options();

    let report = if args.files.is_empty() {
        move_submission(src, tgt, &opts).map_err(|e| {
            error!(code = e.code(), kind = e.kind(), error = %e, "Cannot move submission");
            e
        })?
    } else {
        move_files(src, &args.files, tgt, &opts)
    };

    print_report(&report, cfg.dry_run);

    if shutdown::is_requested() && !report.skipped.is_empty() {
        bail!("interrupted; {} file(s) not moved", report.skipped.len());
    }
    if !report.is_success() {
        bail!(
            "{} of {} file(s) failed, {} skipped",
            report.failed.len(),
            report.total(),
            report.skipped.len()
        );
    }
    info!(moved = report.moved.len(), "Submission moved");
    Ok(())
}

fn print_report(report: &BatchReport, dry_run: bool) {
    for m in &report.moved {
        out::print_moved(&m.source, &m.dest, dry_run);
    }
    for f in &report.failed {
        out::print_error(&format!("{}: {}", f.source.display(), f.error));
    }
    for s in &report.skipped {
        out::print_warn(&format!("skipped: {}", s.display()));
    }

    let verb = if dry_run { "would move" } else { "moved" };
    let summary = format!(
        "{verb} {} file(s); {} failed; {} skipped",
        report.moved.len(),
        report.failed.len(),
        report.skipped.len()
    );
    if report.is_success() {
        out::print_success(&summary);
    } else {
        out::print_warn(&summary);
    }
}

fn print_config_location() -> Result<()> {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}\n",
            PathBuf::from(p).display()
        ));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return Ok(());
    }
    let p = default_config_path()?;
    out::print_info(&format!("Default submission_move config path:\n  {}\n", p.display()));
    if p.exists() {
        out::print_info("A config file already exists at that location.");
    } else {
        out::print_info("No config file exists there yet. Run with --init-config to create a template.");
    }
    Ok(())
}

fn absolutize(p: &Path) -> Result<PathBuf> {
    std::path::absolute(p).map_err(|e| anyhow!("cannot make '{}' absolute: {e}", p.display()))
}
