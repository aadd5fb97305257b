//! I/O error helpers.
//!
//! Turns a bare io::Error into a message naming the operation, the path and a
//! platform-aware hint. Used by `MoveError::Io`'s Display and by the
//! `io_error_with_help` adapter for `.map_err(...)` chains:
//!
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::MoveError;

fn hint_for_os_code(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => {
                Some("permission denied; check ownership and write permissions.")
            }
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible."),
            libc::EBUSY => Some("resource busy; ensure no other process is writing."),
            libc::ENOENT => Some("path not found; verify it exists."),
            libc::EEXIST => Some("already exists; remove the conflicting entry."),
            libc::ENOTDIR => Some("a path component exists but is not a directory."),
            libc::EISDIR => Some("destination is a directory; a file cannot replace it."),
            libc::ENOSPC => Some("insufficient space on device."),
            libc::EROFS => Some("read-only filesystem; cannot write here."),
            libc::ELOOP => Some("too many symbolic link levels (ELOOP); possible symlink cycle."),
            libc::ENAMETOOLONG => Some("filename or path too long; shorten path segments."),
            libc::EMFILE => {
                Some("process file descriptor limit reached; close files or raise limits.")
            }
            libc::ENFILE => Some("system-wide file table overflow; reduce open files."),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions."),
            17 => Some("not same device; cross-filesystem move."),
            32 => Some("sharing violation; file is in use."),
            2 | 3 => Some("path not found; verify it exists."),
            80 | 183 => Some("already exists; remove the conflicting entry."),
            112 => Some("insufficient disk space."),
            19 => Some("write protected / read-only media."),
            206 => Some("filename or path too long (MAX_PATH exceeded)."),
            267 => Some("a path component exists but is not a directory."),
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and write permissions.")
        }
        io::ErrorKind::NotFound => Some("path not found; verify it exists."),
        io::ErrorKind::AlreadyExists => Some("already exists; remove the conflicting entry."),
        io::ErrorKind::NotADirectory => Some("a path component exists but is not a directory."),
        io::ErrorKind::IsADirectory => {
            Some("destination is a directory; a file cannot replace it.")
        }
        io::ErrorKind::StorageFull => Some("insufficient space on device."),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            Some("busy/timed out; retry after the current write finishes.")
        }
        _ => None,
    }
}

/// Format "<op> '<path>': <error> — <hint> [os code: N]".
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    match e.raw_os_error() {
        Some(code) => {
            if let Some(hint) = hint_for_os_code(code) {
                msg.push_str(" — ");
                msg.push_str(hint);
            }
            msg.push_str(&format!(" [os code: {}]", code));
        }
        None => {
            if let Some(hint) = hint_for_kind(e.kind()) {
                msg.push_str(" — ");
                msg.push_str(hint);
            }
        }
    }

    msg
}

/// Adapter for `.map_err(...)` turning io::Error into `MoveError::Io`.
pub fn io_error_with_help<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> MoveError + 'a {
    move |source: io::Error| MoveError::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}

