//! Configuration type definitions
//!
//! Every field is optional at parse time so that a job file can be layered
//! over the global defaults before required keys are enforced.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::entities::{SyncSettings, WatchJob};
use crate::domain::value_objects::RemoteTarget;
use crate::error::{WatchSyncError, WatchSyncResult};
use crate::watcher::DEFAULT_QUIET_PERIOD;

/// One parsed config file (global defaults or a single job).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub local: LocalConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub rsync: RsyncConfig,
}

/// `[local]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocalConfig {
    /// Directory to watch; canonicalised when the job is built
    pub root: Option<PathBuf>,
}

/// `[remote]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteConfig {
    pub user: Option<String>,
    pub host: Option<String>,
    pub root: Option<String>,
    pub password: Option<String>,
}

/// `[rsync]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RsyncConfig {
    pub delete: Option<bool>,

    /// Quiet period in milliseconds
    pub delay_ms: Option<u64>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

impl JobConfig {
    /// Layer `self` over `base`: scalars set here win, exclude lists are
    /// concatenated with the base entries first.
    pub fn layered_over(self, base: &JobConfig) -> JobConfig {
        let mut exclude = base.rsync.exclude.clone();
        exclude.extend(self.rsync.exclude);

        JobConfig {
            local: LocalConfig {
                root: self.local.root.or_else(|| base.local.root.clone()),
            },
            remote: RemoteConfig {
                user: self.remote.user.or_else(|| base.remote.user.clone()),
                host: self.remote.host.or_else(|| base.remote.host.clone()),
                root: self.remote.root.or_else(|| base.remote.root.clone()),
                password: self.remote.password.or_else(|| base.remote.password.clone()),
            },
            rsync: RsyncConfig {
                delete: self.rsync.delete.or(base.rsync.delete),
                delay_ms: self.rsync.delay_ms.or(base.rsync.delay_ms),
                exclude,
            },
        }
    }

    /// Enforce required keys and resolve `local.root`.
    ///
    /// `file` is only used to give errors a location.
    pub fn into_job(self, name: impl Into<String>, file: &Path) -> WatchSyncResult<WatchJob> {
        let missing = |key: &'static str| WatchSyncError::MissingKey {
            key,
            file: file.to_path_buf(),
        };

        let root = self.local.root.ok_or_else(|| missing("local.root"))?;
        let host = self
            .remote
            .host
            .filter(|h| !h.is_empty())
            .ok_or_else(|| missing("remote.host"))?;
        let remote_root = self
            .remote
            .root
            .filter(|r| !r.is_empty())
            .ok_or_else(|| missing("remote.root"))?;

        let invalid_root = || WatchSyncError::InvalidRoot {
            root: root.clone(),
            file: file.to_path_buf(),
        };
        let canonical = std::fs::canonicalize(&root).map_err(|_| invalid_root())?;
        if !canonical.is_dir() {
            return Err(invalid_root());
        }

        Ok(WatchJob {
            name: name.into(),
            root: canonical,
            quiet_period: self
                .rsync
                .delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_QUIET_PERIOD),
            sync: SyncSettings {
                remote: RemoteTarget::new(self.remote.user, host, remote_root),
                delete: self.rsync.delete.unwrap_or(false),
                excludes: self.rsync.exclude,
                password: self.remote.password.filter(|p| !p.is_empty()),
            },
        })
    }
}
