//! Single-file move.
//! Resolves the mirrored destination, creates its ancestry, then attempts an
//! atomic replace; on cross-filesystem or other rename errors falls back to a
//! safe copy + replace followed by removal of the original.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::{MoveError, Result};
use crate::platform;
use crate::resolve::resolve_target_path;
use crate::shutdown;

use super::atomic::try_atomic_move;
use super::copy::safe_copy_and_rename;
use super::helpers::io_error_with_help;
use super::options::MoveOptions;

/// Move `subject` (a file under `source_root`) to its mirrored location under
/// `target_root`, replacing any file already there. Returns the destination.
pub fn move_file(source_root: &Path, subject: &Path, target_root: &Path) -> Result<PathBuf> {
    move_file_with(source_root, subject, target_root, &MoveOptions::default())
}

/// `move_file` honouring `opts` (dry run).
pub fn move_file_with(
    source_root: &Path,
    subject: &Path,
    target_root: &Path,
    opts: &MoveOptions,
) -> Result<PathBuf> {
    if shutdown::is_requested() {
        return Err(MoveError::Interrupted);
    }

    let dest = resolve_target_path(source_root, target_root, subject)?;
    check_subject(source_root, subject, &dest)?;

    if opts.dry_run {
        info!(src = %subject.display(), dest = %dest.display(), "dry-run: would move file");
        return Ok(dest);
    }

    let dest_dir = dest
        .parent()
        .ok_or_else(|| MoveError::invalid(&dest, "destination has no parent directory"))?;
    fs::create_dir_all(dest_dir)
        .map_err(io_error_with_help("create destination directory", dest_dir))?;

    if let Ok(meta) = fs::symlink_metadata(&dest)
        && meta.is_dir()
    {
        return Err(MoveError::Io {
            op: "replace destination",
            path: dest,
            source: io::Error::new(io::ErrorKind::IsADirectory, "destination is a directory"),
        });
    }

    match try_atomic_move(subject, &dest) {
        Ok(()) => {
            info!(src = %subject.display(), dest = %dest.display(), "Renamed file atomically");
            Ok(dest)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound && !subject.exists() => {
            Err(MoveError::NotFound(subject.to_path_buf()))
        }
        Err(e) => {
            let cross_device = platform::is_cross_device(&e);
            let hint = if cross_device {
                "cross-filesystem; will copy instead"
            } else if e.kind() == io::ErrorKind::PermissionDenied {
                "permission denied; check source and destination perms"
            } else {
                "falling back to copy"
            };
            warn!(error = %e, hint, "Atomic rename failed, using safe copy+replace");
            if !cross_device {
                // The copy replaces dest before the source is removed; if removal
                // then fails the move errors with the new content already in place.
                warn!(
                    src = %subject.display(),
                    dest = %dest.display(),
                    "Same-device rename failed; destination may be replaced even if the original cannot be removed"
                );
            }

            let bytes = safe_copy_and_rename(subject, &dest)?;
            fs::remove_file(subject).map_err(io_error_with_help("remove original file", subject))?;
            info!(src = %subject.display(), dest = %dest.display(), bytes, "Copied file and removed original");
            Ok(dest)
        }
    }
}

/// Stat the subject without following links and refuse anything that is not
/// a movable file.
fn check_subject(source_root: &Path, subject: &Path, dest: &Path) -> Result<()> {
    if dunce::simplified(subject).components().eq(dunce::simplified(source_root).components()) {
        return Err(MoveError::invalid(subject, "refusing to move the source root itself"));
    }

    let meta = fs::symlink_metadata(subject).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            MoveError::NotFound(subject.to_path_buf())
        } else {
            io_error_with_help("stat source file", subject)(e)
        }
    })?;

    let ftype = meta.file_type();
    if ftype.is_dir() {
        return Err(MoveError::invalid(subject, "is a directory, not a file"));
    }
    if !ftype.is_file() && !ftype.is_symlink() {
        return Err(MoveError::invalid(subject, "is not a regular file"));
    }

    if subject == dest {
        return Err(MoveError::invalid(subject, "source and destination are the same path"));
    }

    debug!(src = %subject.display(), dest = %dest.display(), len = meta.len(), "subject checked");
    Ok(())
}
