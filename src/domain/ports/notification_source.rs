//! Notification Source Port
//!
//! Abstracts the kernel facility that reports directory changes. The
//! runtime registers directories one at a time (never recursively) and
//! drains whatever has arrived without blocking.

use std::ffi::OsString;
use std::fmt::Debug;
use std::hash::Hash;
use std::io;
use std::path::Path;

/// What happened inside a watched directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Deleted,
    Modified,
    MovedFrom,
    MovedTo,
    /// The source's queue overflowed; an unknown number of changes was lost
    Overflow,
    /// Bookkeeping from the source (watch removed, unmount, ...)
    Other,
}

/// One raw change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification<H> {
    /// Watch that produced it; `None` for queue-level events such as overflow
    pub handle: Option<H>,
    /// Entry name relative to the watched directory, when known
    pub name: Option<OsString>,
    pub kind: ChangeKind,
}

/// Source of directory change notifications.
///
/// Implementations are owned by exactly one job loop and are never shared.
pub trait NotificationSource {
    /// Opaque token identifying one registered directory.
    type Handle: Copy + Eq + Hash + Debug;

    /// Register interest in creation, deletion, modification and both
    /// sides of a rename for entries directly inside `dir`.
    ///
    /// Registering a directory that is already registered must return the
    /// same handle.
    fn register(&mut self, dir: &Path) -> io::Result<Self::Handle>;

    /// Return every notification that has arrived since the last call.
    ///
    /// Never blocks; an empty vector means "nothing this tick".
    fn drain(&mut self) -> io::Result<Vec<Notification<Self::Handle>>>;
}
