//! Configuration module for WatchSync
//!
//! Config sources, in order of precedence for a daemon job:
//! 1. Job file (`/etc/watchsync.d/<name>`)
//! 2. Global defaults (`/etc/watchsync.conf`)
//! 3. Built-in defaults (`delete = false`, `delay_ms = 500`, no excludes)
//!
//! Foreground mode reads a single file with no global layer. Every source
//! must be private to its owner (mode 0600 / 0700).

mod loader;
mod permissions;
mod types;

pub use loader::{load_job_file, load_roster, load_with_warnings, ConfigWarning};
pub use permissions::check_permissions;
pub use types::{JobConfig, LocalConfig, RemoteConfig, RsyncConfig};

/// Default global defaults file
pub const DEFAULT_MAIN_CONFIG: &str = "/etc/watchsync.conf";

/// Default job directory
pub const DEFAULT_CONFIG_DIR: &str = "/etc/watchsync.d";
