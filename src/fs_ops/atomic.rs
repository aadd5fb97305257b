//! Atomic replace helper.
//! - Replaces `dst` in one step (rename(2) on Unix, MoveFileExW on Windows).
//! - On Unix, best-effort fsync of the destination directory after the rename.

use std::io;
use std::path::Path;
use tracing::trace;

use crate::platform;

/// Move `src` onto `dst`, replacing any existing file there.
/// Returns the raw io::Error so callers can decide whether to fall back to copying.
pub fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<()> {
    platform::replace_file(src, dst)?;

    if let Some(parent) = dst.parent() {
        // The rename already happened; a failed fsync must not turn it into an error.
        if let Err(e) = platform::fsync_dir(parent) {
            trace!(dir = %parent.display(), error = %e, "fsync of destination directory failed");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn replaces_existing_destination() {
        let td = tempdir().unwrap();
        let src = td.path().join("new");
        let dst = td.path().join("old");
        fs::write(&src, "New content").unwrap();
        fs::write(&dst, "Initial content").unwrap();

        try_atomic_move(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "New content");
    }

    #[test]
    fn missing_source_keeps_destination() {
        let td = tempdir().unwrap();
        let dst = td.path().join("keep");
        fs::write(&dst, "keep me").unwrap();

        let err = try_atomic_move(&td.path().join("nope"), &dst).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "keep me");
    }
}
