//! Portable notification source built on `notify`
//!
//! Used where inotify is unavailable. Each directory is watched
//! non-recursively so the watch tree stays in charge of coverage, exactly
//! as with the inotify source. `notify` exposes no kernel token, so handles
//! are interned per directory path.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};

use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::warn;

use crate::domain::ports::{ChangeKind, Notification, NotificationSource};
use crate::error::WatchSyncResult;

/// Interned directory handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortableHandle(u64);

pub struct PortableSource {
    watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    handles: HashMap<PathBuf, PortableHandle>,
    next: u64,
}

impl PortableSource {
    pub fn new() -> WatchSyncResult<Self> {
        let (tx, rx) = channel();
        let watcher = RecommendedWatcher::new(tx, Config::default())?;
        Ok(Self {
            watcher,
            rx,
            handles: HashMap::new(),
            next: 1,
        })
    }

    fn handle_for(&self, path: &Path) -> Option<PortableHandle> {
        path.parent()
            .and_then(|dir| self.handles.get(dir))
            .or_else(|| self.handles.get(path))
            .copied()
    }
}

impl NotificationSource for PortableSource {
    type Handle = PortableHandle;

    fn register(&mut self, dir: &Path) -> io::Result<PortableHandle> {
        if let Some(handle) = self.handles.get(dir) {
            return Ok(*handle);
        }

        self.watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(io::Error::other)?;

        let handle = PortableHandle(self.next);
        self.next += 1;
        self.handles.insert(dir.to_path_buf(), handle);
        Ok(handle)
    }

    fn drain(&mut self) -> io::Result<Vec<Notification<PortableHandle>>> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if event.need_rescan() {
                        out.push(Notification {
                            handle: None,
                            name: None,
                            kind: ChangeKind::Overflow,
                        });
                        continue;
                    }
                    let Some(kind) = change_kind(&event.kind) else {
                        continue;
                    };
                    for path in &event.paths {
                        out.push(Notification {
                            handle: self.handle_for(path),
                            name: path.file_name().map(|n| n.to_os_string()),
                            kind,
                        });
                    }
                }
                Ok(Err(err)) => warn!("watcher reported an error: {}", err),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(io::Error::other("watcher channel disconnected"));
                }
            }
        }
        Ok(out)
    }
}

/// Reads and metadata-only updates are not changes worth mirroring; the
/// transfer itself reads every file and must not retrigger a flush.
fn change_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Remove(_) => Some(ChangeKind::Deleted),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => Some(ChangeKind::MovedFrom),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Some(ChangeKind::MovedTo),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        EventKind::Access(_) => None,
        _ => Some(ChangeKind::Other),
    }
}
