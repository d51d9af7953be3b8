//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod notification_source;
pub mod sync_executor;

pub use notification_source::{ChangeKind, Notification, NotificationSource};
pub use sync_executor::{SyncError, SyncExecutor, SyncReport};
