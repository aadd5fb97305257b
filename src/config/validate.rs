//! Config validation logic.
//! Verifies both roots are set, usable, and disjoint before any file is touched.

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::fs_ops::check_roots;
use crate::platform::temp::temp_path_in;

use super::types::Config;

impl Config {
    /// Validate roots: present, absolute, source readable, target writable
    /// (created when missing unless this is a dry run), neither inside the other.
    pub fn validate(&self) -> Result<()> {
        let src = self
            .source_root
            .as_deref()
            .ok_or_else(|| anyhow!("source_root is not set (pass SOURCE_ROOT or set it in config.xml)"))?;
        let tgt = self
            .target_root
            .as_deref()
            .ok_or_else(|| anyhow!("target_root is not set (pass TARGET_ROOT or set it in config.xml)"))?;

        check_roots(src, tgt)?;
        ensure_readable(src, "source_root")?;

        if tgt.exists() {
            ensure_writable(tgt, "target_root")?;
        } else if self.dry_run {
            debug!("target_root missing; dry run leaves it uncreated: {}", tgt.display());
        } else {
            fs::create_dir_all(tgt).with_context(|| {
                format!("Failed to create target_root directory '{}'", tgt.display())
            })?;
            info!("Created target_root directory: {}", tgt.display());
            ensure_writable(tgt, "target_root")?;
        }

        info!(
            "Config validated: source='{}' target='{}' log_file='{}'",
            src.display(),
            tgt.display(),
            self.log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".into())
        );
        Ok(())
    }
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!("Cannot read {name} directory '{}'; check permissions", path.display())
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}

/// Ensure directory is writable using a probe file that is removed right away.
fn ensure_writable(path: &Path, name: &str) -> Result<()> {
    let probe = temp_path_in(path, "probe");
    fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
        .with_context(|| {
            format!("Cannot write to {name} '{}'; check permissions", path.display())
        })?;
    let _ = fs::remove_file(&probe);
    debug!("{name} writable: {}", path.display());
    Ok(())
}
