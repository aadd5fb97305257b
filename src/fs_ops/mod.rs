//! Filesystem operations: modularized.

mod atomic;
mod batch;
mod copy;
mod file_move;
pub mod helpers;
mod io_copy;
mod options;
mod walk;

pub use atomic::try_atomic_move;
pub use batch::{BatchReport, FailedFile, MovedFile, move_files, move_submission};
pub use copy::safe_copy_and_rename;
pub use file_move::{move_file, move_file_with};
pub use helpers::io_error_with_help;
pub use options::{MoveOptions, OnError};
pub use walk::{check_roots, collect_submission_files};
