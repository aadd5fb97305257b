//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

pub mod temp;

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::{
    fsync_dir, is_cross_device, open_log_file_secure_append, replace_file, set_dir_mode_0700,
    write_config_secure_new_0600,
};

#[cfg(windows)]
pub use windows::{
    fsync_dir, is_cross_device, open_log_file_secure_append, replace_file, set_dir_mode_0700,
    write_config_secure_new_0600,
};
