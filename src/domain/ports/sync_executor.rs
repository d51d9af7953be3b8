//! Sync Executor Port
//!
//! The runtime decides *when* to mirror; an executor does the mirroring.
//! Calls are synchronous: the job loop is blocked until the transfer ends.

use std::io;

use thiserror::Error;

use crate::domain::entities::WatchJob;

/// Failure to run a transfer at all (as opposed to a transfer that ran and
/// exited non-zero, which is reported through [`SyncReport`]).
#[derive(Error, Debug)]
pub enum SyncError {
    /// Exclude list could not be written to a temp file
    #[error("failed to write exclude list: {0}")]
    ExcludeFile(#[source] io::Error),

    /// Transfer process could not be started
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Outcome of one transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Process exit code; `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Human-readable change report, one entry per nonempty line
    pub lines: Vec<String>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn has_changes(&self) -> bool {
        !self.lines.is_empty()
    }
}

/// Mirrors a job's root to its remote target.
pub trait SyncExecutor {
    /// Run one transfer for `job` and wait for it to finish.
    fn sync(&self, job: &WatchJob) -> Result<SyncReport, SyncError>;
}
