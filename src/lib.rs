//! WatchSync - continuous one-way directory mirroring
//!
//! WatchSync watches local directory trees for changes and, once a tree has
//! been quiet for a configurable period, mirrors it to a remote host with
//! rsync over ssh. Each configured job runs in its own process.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod watcher;

// Re-exports for convenience
pub use application::{JobRuntime, Supervisor, Tick};
pub use config::{load_job_file, load_roster};
pub use domain::entities::{Roster, SyncSettings, WatchJob};
pub use domain::value_objects::RemoteTarget;
pub use error::{WatchSyncError, WatchSyncResult};
pub use infrastructure::RsyncExecutor;
pub use logging::LogSink;
