//! Typed error definitions for submission_move.
//! Every filesystem failure in the library surfaces as one of these variants so
//! callers can branch on the failure mode instead of parsing messages.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fs_ops::helpers::describe_io_error;

pub type Result<T, E = MoveError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum MoveError {
    /// The path arguments violate the resolution contract.
    #[error("Invalid argument '{path}': {reason}")]
    InvalidArgument { path: PathBuf, reason: String },

    #[error("Source path not found: {0}")]
    NotFound(PathBuf),

    /// Directory creation, transfer or removal failed.
    #[error("{}", describe_io_error(.op, .path, .source))]
    Io {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl MoveError {
    pub(crate) fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        MoveError::InvalidArgument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Stable numeric code for structured logs and exit statuses.
    pub fn code(&self) -> i32 {
        match self {
            MoveError::InvalidArgument { .. } => 2,
            MoveError::NotFound(_) => 3,
            MoveError::Io { .. } => 4,
            MoveError::Interrupted => 130,
        }
    }

    /// Short machine-friendly name of the failure mode.
    pub fn kind(&self) -> &'static str {
        match self {
            MoveError::InvalidArgument { .. } => "invalid_argument",
            MoveError::NotFound(_) => "not_found",
            MoveError::Io { .. } => "io_failure",
            MoveError::Interrupted => "interrupted",
        }
    }

    /// The underlying io::Error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            MoveError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
