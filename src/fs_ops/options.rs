//! Per-call knobs for the mover and the batch layer.

use std::fmt;
use std::str::FromStr;

/// What a batch does after one file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnError {
    /// Keep moving the remaining files; every failure is reported.
    #[default]
    Continue,
    /// Stop at the first failure; unstarted files are reported as skipped.
    Abort,
}

impl OnError {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" | "keep-going" => Some(OnError::Continue),
            "abort" | "fail-fast" | "stop" => Some(OnError::Abort),
            _ => None,
        }
    }
}

impl fmt::Display for OnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OnError::Continue => "continue",
            OnError::Abort => "abort",
        })
    }
}

impl FromStr for OnError {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid on_error policy: '{s}'"))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoveOptions {
    /// Resolve and validate only; touch nothing on disk.
    pub dry_run: bool,
    pub on_error: OnError,
    /// Move the files of one batch on the rayon pool.
    pub parallel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_error_parses_aliases() {
        assert_eq!("Continue".parse::<OnError>().unwrap(), OnError::Continue);
        assert_eq!(" fail-fast ".parse::<OnError>().unwrap(), OnError::Abort);
        assert!("sometimes".parse::<OnError>().is_err());
        assert_eq!(OnError::Abort.to_string(), "abort");
    }
}
