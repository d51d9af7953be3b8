//! Error types for WatchSync
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for WatchSync operations
pub type WatchSyncResult<T> = Result<T, WatchSyncError>;

/// Main error type for WatchSync operations
#[derive(Error, Debug)]
pub enum WatchSyncError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has wrongly typed values
    #[error("invalid config in {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// Required key absent after layering
    #[error("missing required key '{key}' in {file}")]
    MissingKey { key: &'static str, file: PathBuf },

    /// `local.root` does not resolve to an existing directory
    #[error("invalid local.root '{root}' in {file}")]
    InvalidRoot { root: PathBuf, file: PathBuf },

    /// Config source is readable by group or others
    #[error("'{}' has too open permissions ({mode:04o}). Must be 0600 or 0700.", path.display())]
    InsecurePermissions { path: PathBuf, mode: u32 },

    /// Daemon mode found nothing to run
    #[error("no valid jobs found. Check permissions and {}", dir.display())]
    NoJobs { dir: PathBuf },

    /// Kernel notification source could not be created or read
    #[error("notification source error: {0}")]
    Notification(#[from] nix::errno::Errno),

    /// Portable notification backend failure
    #[error("watcher error: {0}")]
    Watcher(#[from] notify::Error),

    /// Could not fork a job process
    #[error("failed to fork job '{job}': {source}")]
    Fork {
        job: String,
        source: nix::errno::Errno,
    },

    /// Could not detach from the controlling terminal
    #[error("failed to daemonize: {0}")]
    Detach(String),

    /// Logging subscriber could not be installed
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
