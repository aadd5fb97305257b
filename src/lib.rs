//! submission_move library crate.
//!
//! Moves the files of a submission from a staging ("source") root into a final
//! ("target") root, keeping each file's path relative to the root.
//!
//! Highlights:
//! - `resolve_target_path` maps a file below the source root to its place below the target root.
//! - `move_file` creates missing destination directories, replaces an existing
//!   destination atomically, and removes the source.
//! - Same-filesystem moves are a single rename; cross-device moves copy into a
//!   temporary sibling of the destination and rename it into place.
//! - `move_submission` walks a whole source tree; `move_files` moves an explicit list.
//! - Failures are classified as invalid argument, not found, or I/O failure (`MoveError`).

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod resolve;
pub mod shutdown;

pub use config::types::{Config, LogLevel};
pub use config::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::{MoveError, Result};
pub use fs_ops::{
    BatchReport, MoveOptions, OnError, move_file, move_file_with, move_files, move_submission,
};
pub use resolve::{relative_to_root, resolve_target_path};

/// Commonly used items for embedding the mover.
pub mod prelude {
    pub use crate::{
        BatchReport, Config, MoveError, MoveOptions, OnError, move_file, move_files,
        move_submission, resolve_target_path,
    };
}
