//! Recursive watch tree
//!
//! Registers every real directory under a job root with a notification
//! source. Registration is additive: rebuilding picks up directories created
//! since the last walk, and entries for deleted directories are left in
//! place (the source stops reporting on them, so they never match again).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::domain::ports::NotificationSource;

/// Counters from one build pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Directories successfully registered (new or already known)
    pub registered: usize,
    /// Registrations that produced a handle not seen before
    pub added: usize,
    /// Directories that could not be read or registered
    pub skipped: usize,
}

/// Mapping from watch handle to the directory it covers.
#[derive(Debug)]
pub struct WatchTree<H> {
    root: PathBuf,
    entries: HashMap<H, PathBuf>,
}

impl<H> WatchTree<H>
where
    H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
{
    /// `root` must already be canonical and absolute.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Directory registered under `handle`, if any.
    pub fn path_of(&self, handle: H) -> Option<&Path> {
        self.entries.get(&handle).map(PathBuf::as_path)
    }

    /// Whether `dir` has been registered by some build pass.
    pub fn covers(&self, dir: &Path) -> bool {
        self.entries.values().any(|p| p == dir)
    }

    /// Walk the subtree and register every directory found.
    ///
    /// Symlinks are never followed: an entry counts only if its own file
    /// type is a directory. Unreadable subtrees and failed registrations
    /// are skipped; the walk carries on with the rest of the tree.
    pub fn build<S>(&mut self, source: &mut S) -> BuildStats
    where
        S: NotificationSource<Handle = H>,
    {
        let mut stats = BuildStats::default();

        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("skipping unreadable path: {}", err);
                    stats.skipped += 1;
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            match source.register(entry.path()) {
                Ok(handle) => {
                    stats.registered += 1;
                    if self
                        .entries
                        .insert(handle, entry.path().to_path_buf())
                        .is_none()
                    {
                        stats.added += 1;
                    }
                }
                Err(err) => {
                    debug!("cannot watch {}: {}", entry.path().display(), err);
                    stats.skipped += 1;
                }
            }
        }

        stats
    }
}
