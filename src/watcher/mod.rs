//! Directory watching for continuous mirroring
//!
//! Implements the watch side of a job:
//! - Recursive, additive watch tree over a job root
//! - Quiet-period debouncing (200ms polling cadence)
//! - inotify source on Linux, `notify`-based source elsewhere

mod debounce;
#[cfg(test)]
pub(crate) mod fake;
#[cfg(target_os = "linux")]
mod inotify;
mod portable;
mod tree;

pub use debounce::{DebounceState, Debouncer, DEFAULT_QUIET_PERIOD, POLL_INTERVAL};
#[cfg(target_os = "linux")]
pub use inotify::InotifySource;
pub use portable::{PortableHandle, PortableSource};
pub use tree::{BuildStats, WatchTree};

use crate::error::WatchSyncResult;

/// Notification source used for real jobs on this platform.
#[cfg(target_os = "linux")]
pub type DefaultSource = InotifySource;

/// Notification source used for real jobs on this platform.
#[cfg(not(target_os = "linux"))]
pub type DefaultSource = PortableSource;

/// Create the platform's notification source.
pub fn default_source() -> WatchSyncResult<DefaultSource> {
    DefaultSource::new()
}
