//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation happens elsewhere.
//! - Unknown fields and unparsable values are errors so misconfigurations surface early.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::{Deserialize, Deserializer};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::CONFIG_ENV;
use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::fs_ops::OnError;
use crate::platform::{set_dir_mode_0700, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source_root: Option<String>,
    target_root: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    on_error: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    parallel: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    dry_run: Option<bool>,
}

// Accepts surrounding whitespace and the usual spellings of a boolean.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => match s.as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("invalid boolean: '{other}'"))),
        },
    }
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(PathBuf::from)
}

/// Parse XML text into a Config layered over the defaults.
pub fn parse_config_xml(content: &str) -> Result<Config> {
    let parsed: XmlConfig = from_xml_str(content).context("parse config xml")?;
    let mut cfg = Config::default();

    cfg.source_root = non_empty_path(parsed.source_root.as_deref());
    cfg.target_root = non_empty_path(parsed.target_root.as_deref());
    cfg.log_file = non_empty_path(parsed.log_file.as_deref());

    if let Some(s) = parsed.log_level.as_deref().filter(|s| !s.trim().is_empty()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = parsed.on_error.as_deref().filter(|s| !s.trim().is_empty()) {
        cfg.on_error = s.parse::<OnError>().map_err(anyhow::Error::msg)?;
    }
    cfg.parallel = parsed.parallel.unwrap_or(false);
    cfg.dry_run = parsed.dry_run.unwrap_or(false);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config_xml(&contents).with_context(|| format!("load config '{}'", path.display()))
}

/// Load the config in effect.
/// - `$SUBMISSION_MOVE_CONFIG` set: the file must exist and parse.
/// - Otherwise the platform default path; a missing file yields `Ok(None)`.
pub fn load_config() -> Result<Option<(PathBuf, Config)>> {
    let explicit = env::var_os(CONFIG_ENV).is_some();
    let path = default_config_path()?;

    if !path.exists() {
        if explicit {
            bail!(
                "{} points to '{}', which does not exist",
                CONFIG_ENV,
                path.display()
            );
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }

    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(Some((path, cfg)))
}

/// Create a commented template config file (0600, parent 0700 on Unix).
/// Refuses to overwrite an existing file or to write below a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/submission_move.log".into());

    let content = format!(
        "<!--\n  submission_move configuration (XML)\n\n  Fields:\n    source_root  -> staging directory the submission is moved out of\n    target_root  -> final directory; created if missing\n    log_level    -> quiet | normal | info | debug\n    log_file     -> path to log file (optional; leave empty to log to stdout only)\n    on_error     -> continue | abort (what to do after one file fails)\n    parallel     -> true | false (move files of one submission concurrently)\n    dry_run      -> true | false (report what would move; change nothing)\n\n  Positional SOURCE_ROOT / TARGET_ROOT and CLI flags override these values.\n-->\n<config>\n  <source_root></source_root>\n  <target_root></target_root>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n  <on_error>continue</on_error>\n  <parallel>false</parallel>\n  <dry_run>false</dry_run>\n</config>\n",
        suggested_log
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}
