//! Sync Executor Implementations
//!
//! Provides the concrete implementation of the SyncExecutor port:
//! - RsyncExecutor: rsync over ssh, optionally authenticated through sshpass

mod rsync;

pub use rsync::RsyncExecutor;
