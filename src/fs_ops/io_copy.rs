//! Streaming copy into a freshly created file.
//!
//! - The destination is created with `create_new(true)` so an existing file is
//!   never clobbered; callers copy into a temp name and rename afterwards.
//! - File-to-file `io::copy` lets std use in-kernel copies where available
//!   (copy_file_range / sendfile on Linux).
//! - Permission bits follow the source, as a plain copy would.
//! - The destination is fsynced before returning.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes
//! appended concurrently may or may not be included.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Copy `src` -> `dst` (which must not exist). Returns the number of bytes written.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut src_f = File::open(src)?;
    let src_meta = src_f.metadata()?;

    let mut dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;
    let bytes = io::copy(&mut src_f, &mut dst_f)?;

    dst_f.set_permissions(src_meta.permissions())?;
    dst_f.sync_all()?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write as _;
    use tempfile::tempdir;

    #[test]
    fn copy_small_file_ok() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("src.txt");
        let dst_path = dir.path().join("dst.txt");

        let data = b"hello world";
        fs::write(&src_path, data).unwrap();

        let n = copy_streaming(&src_path, &dst_path).unwrap();
        assert_eq!(n, data.len() as u64);
        assert_eq!(fs::read(&dst_path).unwrap(), data);
    }

    #[test]
    fn copy_zero_length_ok() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("empty");
        let dst_path = dir.path().join("out");
        File::create(&src_path).unwrap();

        let n = copy_streaming(&src_path, &dst_path).unwrap();
        assert_eq!(n, 0);
        assert_eq!(fs::metadata(&dst_path).unwrap().len(), 0);
    }

    #[test]
    fn fails_if_dest_exists() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("src");
        let dst_path = dir.path().join("dst");
        fs::write(&src_path, b"data").unwrap();
        let mut f = File::create(&dst_path).unwrap();
        f.write_all(b"x").unwrap();
        drop(f);

        let err = copy_streaming(&src_path, &dst_path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&dst_path).unwrap(), b"x");
    }

    #[test]
    fn large_file_copy_crosses_chunk_boundaries() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("big.bin");
        let dst = dir.path().join("big.out");

        let size = 2 * 1024 * 1024 + 123;
        let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        let n = copy_streaming(&src, &dst).unwrap();
        assert_eq!(n as usize, size);
        assert_eq!(fs::read(&dst).unwrap(), data);
    }

    #[cfg(unix)]
    #[test]
    fn permission_bits_follow_source() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let src = dir.path().join("script.sh");
        let dst = dir.path().join("script.out");
        fs::write(&src, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o750)).unwrap();

        copy_streaming(&src, &dst).unwrap();
        let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o750);
    }
}
