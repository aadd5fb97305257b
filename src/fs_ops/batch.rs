//! Batch moves.
//! Runs the single-file mover over a list of files (or a walked tree) and
//! records each file's outcome on its own: one failure never hides another
//! file's success.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

use crate::errors::{MoveError, Result};
use crate::shutdown;

use super::file_move::move_file_with;
use super::options::{MoveOptions, OnError};
use super::walk::{check_roots, collect_submission_files};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    pub source: PathBuf,
    pub dest: PathBuf,
}

#[derive(Debug)]
pub struct FailedFile {
    pub source: PathBuf,
    pub error: MoveError,
}

/// Per-file outcomes of a batch, in input order within each list.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub moved: Vec<MovedFile>,
    pub failed: Vec<FailedFile>,
    /// Files never attempted (abort policy or shutdown).
    pub skipped: Vec<PathBuf>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }

    pub fn total(&self) -> usize {
        self.moved.len() + self.failed.len() + self.skipped.len()
    }
}

enum Outcome {
    Moved(PathBuf),
    Failed(MoveError),
    Skipped,
}

/// Move every file in `files` from `source_root` to `target_root`.
/// Relative entries are taken relative to `source_root`.
pub fn move_files<I, P>(
    source_root: &Path,
    files: I,
    target_root: &Path,
    opts: &MoveOptions,
) -> BatchReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let files: Vec<PathBuf> = files
        .into_iter()
        .map(|f| {
            let f = f.as_ref();
            if f.is_absolute() {
                f.to_path_buf()
            } else {
                source_root.join(f)
            }
        })
        .collect();

    let stop = AtomicBool::new(false);
    let run_one = |path: &PathBuf| -> Outcome {
        if stop.load(Ordering::Relaxed) || shutdown::is_requested() {
            return Outcome::Skipped;
        }
        match move_file_with(source_root, path, target_root, opts) {
            Ok(dest) => Outcome::Moved(dest),
            Err(MoveError::Interrupted) => Outcome::Skipped,
            Err(e) => {
                error!(
                    src = %path.display(),
                    code = e.code(),
                    kind = e.kind(),
                    error = %e,
                    "Move failed"
                );
                if opts.on_error == OnError::Abort {
                    stop.store(true, Ordering::Relaxed);
                }
                Outcome::Failed(e)
            }
        }
    };

    let outcomes: Vec<Outcome> = if opts.parallel {
        files.par_iter().map(run_one).collect()
    } else {
        files.iter().map(run_one).collect()
    };

    let mut report = BatchReport::default();
    for (source, outcome) in files.into_iter().zip(outcomes) {
        match outcome {
            Outcome::Moved(dest) => report.moved.push(MovedFile { source, dest }),
            Outcome::Failed(error) => report.failed.push(FailedFile { source, error }),
            Outcome::Skipped => report.skipped.push(source),
        }
    }

    if !report.skipped.is_empty() {
        warn!(skipped = report.skipped.len(), "Some files were not attempted");
    }
    info!(
        moved = report.moved.len(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
        dry_run = opts.dry_run,
        "Batch finished"
    );
    report
}

/// Move the whole tree under `source_root` into `target_root`.
/// Fails up front if the roots are unusable; per-file failures land in the report.
pub fn move_submission(
    source_root: &Path,
    target_root: &Path,
    opts: &MoveOptions,
) -> Result<BatchReport> {
    check_roots(source_root, target_root)?;
    let files = collect_submission_files(source_root)?;
    info!(
        source = %source_root.display(),
        target = %target_root.display(),
        files = files.len(),
        "Moving submission"
    );
    Ok(move_files(source_root, files, target_root, opts))
}
