//! Destination path resolution.
//!
//! Maps a file nested anywhere under a source root onto the mirrored location
//! under a target root. Resolution is purely lexical: it never touches the
//! filesystem and never consults the current directory, so the same inputs
//! always produce the same output.

use std::path::{Component, Path, PathBuf};

use crate::errors::{MoveError, Result};

/// Path of `subject` relative to `source_root`, keeping every intermediate
/// directory segment. Empty when `subject` is the root itself.
pub fn relative_to_root(source_root: &Path, subject: &Path) -> Result<PathBuf> {
    let root = dunce::simplified(source_root);
    let subj = dunce::simplified(subject);

    ensure_absolute(root, "source root")?;
    ensure_absolute(subj, "subject file")?;

    // strip_prefix compares whole components, so "/tmp/source2/x" is not under "/tmp/source".
    let rel = subj.strip_prefix(root).map_err(|_| {
        MoveError::invalid(
            subject,
            format!("not located under source root '{}'", source_root.display()),
        )
    })?;

    if rel.components().any(|c| !matches!(c, Component::Normal(_))) {
        return Err(MoveError::invalid(
            subject,
            "relative path must not contain '..' or root components",
        ));
    }

    Ok(rel.to_path_buf())
}

/// Absolute destination under `target_root` mirroring `subject`'s position
/// under `source_root`.
///
/// A direct child `S/name` maps to `T/name`; `S/d1/d2/name` maps to
/// `T/d1/d2/name`. When `subject == source_root` the result is `target_root`
/// itself; callers moving files should refuse that case.
pub fn resolve_target_path(
    source_root: &Path,
    target_root: &Path,
    subject: &Path,
) -> Result<PathBuf> {
    let target = dunce::simplified(target_root);
    ensure_absolute(target, "target root")?;

    let rel = relative_to_root(source_root, subject)?;
    if rel.as_os_str().is_empty() {
        return Ok(target.to_path_buf());
    }
    Ok(target.join(rel))
}

fn ensure_absolute(path: &Path, what: &str) -> Result<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(MoveError::invalid(path, format!("{what} must be an absolute path")))
    }
}
