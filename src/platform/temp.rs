//! Unique hidden sibling names for write-then-rename operations.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix shared by every transient file this crate creates.
pub const TEMP_PREFIX: &str = ".submission_move.";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Hidden temp path inside `dir`.
/// Pattern: .submission_move.<tag>.<pid>.<nanos>.<seq>.tmp
pub fn temp_path_in(dir: &Path, tag: &str) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    dir.join(format!("{TEMP_PREFIX}{tag}.{pid}.{nanos}.{seq}.tmp"))
}

/// Hidden temp path next to `target`.
pub fn temp_sibling_of(target: &Path, tag: &str) -> PathBuf {
    temp_path_in(target.parent().unwrap_or_else(|| Path::new(".")), tag)
}

/// True for names produced by this module.
pub fn is_temp_name(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX) && name.ends_with(".tmp")
}
