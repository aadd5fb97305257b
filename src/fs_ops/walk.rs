//! Submission enumeration.
//! Produces the list of files the batch layer should move: every regular file
//! (and symlink, treated as a file) below the source root, in a stable order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{MoveError, Result};

use super::helpers::io_error_with_help;

/// Walk `source_root` (not following links) and collect the files beneath it.
pub fn collect_submission_files(source_root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(source_root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source_root.to_path_buf());
            MoveError::Io {
                op: "walk source tree",
                path,
                source: io::Error::from(e),
            }
        })?;

        let ftype = entry.file_type();
        if ftype.is_file() || ftype.is_symlink() {
            files.push(entry.into_path());
        }
    }

    debug!(root = %source_root.display(), count = files.len(), "collected submission files");
    Ok(files)
}

/// Check that both roots are usable for a tree move: absolute, the source an
/// existing directory, and neither root nested inside the other.
pub fn check_roots(source_root: &Path, target_root: &Path) -> Result<()> {
    for (root, what) in [(source_root, "source root"), (target_root, "target root")] {
        if !root.is_absolute() {
            return Err(MoveError::invalid(root, format!("{what} must be an absolute path")));
        }
    }

    let meta = fs::metadata(source_root).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            MoveError::NotFound(source_root.to_path_buf())
        } else {
            io_error_with_help("stat source root", source_root)(e)
        }
    })?;
    if !meta.is_dir() {
        return Err(MoveError::invalid(source_root, "source root is not a directory"));
    }

    if let Ok(tmeta) = fs::metadata(target_root)
        && !tmeta.is_dir()
    {
        return Err(MoveError::invalid(target_root, "target root exists but is not a directory"));
    }

    let src_real = real_path(source_root);
    let dst_real = real_path(target_root);
    if src_real == dst_real {
        return Err(MoveError::invalid(
            target_root,
            format!("source and target roots both resolve to '{}'", src_real.display()),
        ));
    }
    if dst_real.starts_with(&src_real) {
        return Err(MoveError::invalid(target_root, "target root must not be inside the source root"));
    }
    if src_real.starts_with(&dst_real) {
        return Err(MoveError::invalid(source_root, "source root must not be inside the target root"));
    }
    Ok(())
}

/// Canonical form of `path`; for a path that does not exist yet, the
/// canonical form of its nearest existing ancestor plus the remainder.
fn real_path(path: &Path) -> PathBuf {
    if let Ok(p) = dunce::canonicalize(path) {
        return p;
    }
    let mut missing = Vec::new();
    let mut cur = path;
    while let Some(parent) = cur.parent() {
        if let Some(name) = cur.file_name() {
            missing.push(name.to_os_string());
        }
        if let Ok(mut base) = dunce::canonicalize(parent) {
            for name in missing.iter().rev() {
                base.push(name);
            }
            return base;
        }
        cur = parent;
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn collects_nested_files_in_name_order() {
        let td = tempdir().unwrap();
        let root = td.path();
        fs::create_dir_all(root.join("b/deeper")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b/deeper/c.txt"), "c").unwrap();
        fs::write(root.join("b/b.txt"), "b").unwrap();

        let files = collect_submission_files(root).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b/b.txt"),
                PathBuf::from("b/deeper/c.txt"),
            ]
        );
    }

    #[test]
    fn missing_root_is_io_error() {
        let td = tempdir().unwrap();
        let err = collect_submission_files(&td.path().join("nope")).unwrap_err();
        assert!(matches!(err, MoveError::Io { .. }), "{err:?}");
    }

    #[test]
    fn nested_roots_are_rejected() {
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        fs::create_dir_all(&src).unwrap();

        let inside = check_roots(&src, &src.join("out")).unwrap_err();
        assert!(matches!(inside, MoveError::InvalidArgument { .. }), "{inside:?}");

        let same = check_roots(&src, &src).unwrap_err();
        assert!(matches!(same, MoveError::InvalidArgument { .. }), "{same:?}");

        check_roots(&src, &td.path().join("not-yet-created")).unwrap();
    }

    #[test]
    fn missing_source_root_is_not_found() {
        let td = tempdir().unwrap();
        let err = check_roots(&td.path().join("absent"), &td.path().join("t")).unwrap_err();
        assert!(matches!(err, MoveError::NotFound(_)), "{err:?}");
    }
}
