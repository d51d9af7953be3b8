//! inotify notification source (Linux)
//!
//! Non-blocking descriptor; the kernel hands back the same watch descriptor
//! when a directory is registered twice, which keeps tree rebuilds
//! idempotent.

use std::io;
use std::path::Path;

use nix::errno::Errno;
use nix::sys::inotify::{AddWatchFlags, InitFlags, Inotify, WatchDescriptor};

use crate::domain::ports::{ChangeKind, Notification, NotificationSource};
use crate::error::WatchSyncResult;

/// Creation, deletion, modification and both sides of a rename.
const WATCH_MASK: AddWatchFlags = AddWatchFlags::IN_CREATE
    .union(AddWatchFlags::IN_DELETE)
    .union(AddWatchFlags::IN_MODIFY)
    .union(AddWatchFlags::IN_MOVED_FROM)
    .union(AddWatchFlags::IN_MOVED_TO);

pub struct InotifySource {
    inotify: Inotify,
}

impl InotifySource {
    /// Failing here is fatal for the job: without a descriptor there is
    /// nothing to watch with.
    pub fn new() -> WatchSyncResult<Self> {
        let inotify = Inotify::init(InitFlags::IN_NONBLOCK | InitFlags::IN_CLOEXEC)?;
        Ok(Self { inotify })
    }
}

impl NotificationSource for InotifySource {
    type Handle = WatchDescriptor;

    fn register(&mut self, dir: &Path) -> io::Result<WatchDescriptor> {
        Ok(self.inotify.add_watch(dir, WATCH_MASK)?)
    }

    fn drain(&mut self) -> io::Result<Vec<Notification<WatchDescriptor>>> {
        let mut out = Vec::new();
        loop {
            match self.inotify.read_events() {
                Ok(events) if events.is_empty() => break,
                Ok(events) => out.extend(events.into_iter().map(|event| {
                    let kind = change_kind(event.mask);
                    Notification {
                        handle: (kind != ChangeKind::Overflow).then_some(event.wd),
                        name: event.name,
                        kind,
                    }
                })),
                Err(Errno::EAGAIN) => break,
                Err(Errno::EINTR) => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(out)
    }
}

fn change_kind(mask: AddWatchFlags) -> ChangeKind {
    if mask.contains(AddWatchFlags::IN_Q_OVERFLOW) {
        ChangeKind::Overflow
    } else if mask.contains(AddWatchFlags::IN_CREATE) {
        ChangeKind::Created
    } else if mask.contains(AddWatchFlags::IN_DELETE) {
        ChangeKind::Deleted
    } else if mask.contains(AddWatchFlags::IN_MODIFY) {
        ChangeKind::Modified
    } else if mask.contains(AddWatchFlags::IN_MOVED_FROM) {
        ChangeKind::MovedFrom
    } else if mask.contains(AddWatchFlags::IN_MOVED_TO) {
        ChangeKind::MovedTo
    } else {
        ChangeKind::Other
    }
}
