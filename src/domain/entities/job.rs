//! Watch job entity

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::value_objects::RemoteTarget;

/// One independently configured unit of watch-and-mirror work.
///
/// Built once at startup and never mutated afterwards; each job process
/// owns its copy exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchJob {
    /// Log correlation only (config file name, or "cli" in foreground mode)
    pub name: String,
    /// Canonical absolute path of the watched subtree
    pub root: PathBuf,
    /// Silence required after the last change before a flush
    pub quiet_period: Duration,
    /// Everything the sync executor needs besides the root
    pub sync: SyncSettings,
}

/// Transfer settings handed to the sync executor untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub remote: RemoteTarget,
    /// Remove remote files that no longer exist locally
    pub delete: bool,
    /// rsync exclude patterns, in order
    pub excludes: Vec<String>,
    pub password: Option<String>,
}

impl fmt::Debug for SyncSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncSettings")
            .field("remote", &self.remote)
            .field("delete", &self.delete)
            .field("excludes", &self.excludes)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
