//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all process-level I/O.
//!
//! ## Structure
//!
//! - `sync/` - Sync executor implementations (rsync)
//! - `daemon` - Detaching from the controlling terminal

pub mod daemon;
pub mod sync;

// Re-export for convenience
pub use daemon::detach;
pub use sync::RsyncExecutor;
