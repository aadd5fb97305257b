//! Safe copy-and-replace helper:
//! - Copies to a temp file in the destination directory (fsynced)
//! - Atomically renames temp -> dest, replacing any existing file
//! - Removes the temp file on every failure path
//!
//! Readers of `dest` see either the previous content or the complete new
//! content, never a truncated file.

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help;
use super::io_copy;
use crate::errors::{MoveError, Result};
use crate::platform::temp::temp_path_in;

/// Copy `src` over `dest` without a window where `dest` is empty or partial.
/// The destination directory must already exist. `src` is left in place.
pub fn safe_copy_and_rename(src: &Path, dest: &Path) -> Result<u64> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| MoveError::invalid(dest, "destination has no parent directory"))?;

    let tmp_path = temp_path_in(dest_dir, "xfer");

    let bytes = match io_copy::copy_streaming(src, &tmp_path) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            if e.kind() == io::ErrorKind::NotFound && !src.exists() {
                return Err(MoveError::NotFound(src.to_path_buf()));
            }
            return Err(io_error_with_help("copy to temporary file", &tmp_path)(e));
        }
    };
    debug!(src = %src.display(), tmp = %tmp_path.display(), bytes, "copied to temporary file");

    if let Err(e) = try_atomic_move(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("replace destination", dest)(e));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::temp::is_temp_name;
    use tempfile::tempdir;

    fn temp_leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| is_temp_name(n))
            .collect()
    }

    #[test]
    fn replaces_existing_and_keeps_source() {
        let td = tempdir().unwrap();
        let src = td.path().join("src.txt");
        let dest_dir = td.path().join("out");
        fs::create_dir_all(&dest_dir).unwrap();
        let dest = dest_dir.join("temp");
        fs::write(&src, "New content").unwrap();
        fs::write(&dest, "Initial content").unwrap();

        let n = safe_copy_and_rename(&src, &dest).unwrap();

        assert_eq!(n, "New content".len() as u64);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "New content");
        assert!(src.exists());
        assert!(temp_leftovers(&dest_dir).is_empty());
    }

    #[test]
    fn missing_source_is_not_found_and_cleans_temp() {
        let td = tempdir().unwrap();
        let dest = td.path().join("dest.txt");
        fs::write(&dest, "keep").unwrap();

        let err = safe_copy_and_rename(&td.path().join("gone.txt"), &dest).unwrap_err();

        assert!(matches!(err, MoveError::NotFound(_)), "{err:?}");
        assert_eq!(fs::read_to_string(&dest).unwrap(), "keep");
        assert!(temp_leftovers(td.path()).is_empty());
    }

    #[test]
    fn destination_directory_is_io_failure() {
        let td = tempdir().unwrap();
        let src = td.path().join("src.txt");
        fs::write(&src, "data").unwrap();
        let dest = td.path().join("occupied");
        fs::create_dir_all(dest.join("child")).unwrap();

        let err = safe_copy_and_rename(&src, &dest).unwrap_err();

        assert!(matches!(err, MoveError::Io { .. }), "{err:?}");
        assert!(dest.join("child").is_dir());
        assert!(temp_leftovers(td.path()).is_empty());
    }
}
