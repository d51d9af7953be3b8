//! In-memory notification source for tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::domain::ports::{ChangeKind, Notification, NotificationSource};

/// Shared queue a test pushes into after the source has been moved away.
#[derive(Clone, Default)]
pub(crate) struct Inbox(Rc<RefCell<Vec<Notification<u32>>>>);

impl Inbox {
    pub(crate) fn push(&self, kind: ChangeKind) {
        self.0.borrow_mut().push(Notification {
            handle: Some(1),
            name: Some("file.txt".into()),
            kind,
        });
    }
}

#[derive(Default)]
pub(crate) struct FakeSource {
    handles: HashMap<PathBuf, u32>,
    refused: HashSet<PathBuf>,
    inbox: Inbox,
    pub(crate) register_calls: usize,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn inbox(&self) -> Inbox {
        self.inbox.clone()
    }

    /// Make registration of `dir` fail with permission denied.
    pub(crate) fn refuse(&mut self, dir: impl Into<PathBuf>) {
        self.refused.insert(dir.into());
    }
}

impl NotificationSource for FakeSource {
    type Handle = u32;

    fn register(&mut self, dir: &Path) -> io::Result<u32> {
        self.register_calls += 1;
        if self.refused.contains(dir) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        let next = self.handles.len() as u32 + 1;
        Ok(*self.handles.entry(dir.to_path_buf()).or_insert(next))
    }

    fn drain(&mut self) -> io::Result<Vec<Notification<u32>>> {
        Ok(std::mem::take(&mut *self.inbox.0.borrow_mut()))
    }
}
