//! Background detach
//!
//! Forks into the background, starts a new session and moves the working
//! directory to `/` so no mount point stays pinned. Standard streams are
//! redirected to `/dev/null`; diagnostics from here on must go through the
//! system log.

use daemonize::Daemonize;

use crate::error::{WatchSyncError, WatchSyncResult};

/// Detach the current process. Returns in the daemon; the invoking process
/// exits with status 0.
pub fn detach() -> WatchSyncResult<()> {
    Daemonize::new()
        .working_directory("/")
        .umask(0o027)
        .start()
        .map_err(|e| WatchSyncError::Detach(e.to_string()))
}
