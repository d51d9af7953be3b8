//! Property tests for watch tree rebuilding.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;

use watchsync::domain::ports::{Notification, NotificationSource};
use watchsync::watcher::WatchTree;

/// Hands out one stable handle per directory, like the kernel does.
#[derive(Default)]
struct InternSource {
    handles: HashMap<PathBuf, u32>,
}

impl NotificationSource for InternSource {
    type Handle = u32;

    fn register(&mut self, dir: &Path) -> io::Result<u32> {
        let next = self.handles.len() as u32 + 1;
        Ok(*self.handles.entry(dir.to_path_buf()).or_insert(next))
    }

    fn drain(&mut self) -> io::Result<Vec<Notification<u32>>> {
        Ok(Vec::new())
    }
}

fn dir_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,6}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Rebuilding never adds entries or changes handles when the
    /// directory structure is unchanged.
    #[test]
    fn property_rebuild_is_idempotent(
        paths in proptest::collection::vec(proptest::collection::vec(dir_name(), 1..4), 0..10),
    ) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        for components in &paths {
            fs::create_dir_all(components.iter().fold(root.clone(), |p, c| p.join(c))).unwrap();
        }

        let mut source = InternSource::default();
        let mut tree = WatchTree::new(&root);
        let first = tree.build(&mut source);
        let snapshot: Vec<_> = (1..=tree.len() as u32)
            .map(|h| tree.path_of(h).map(Path::to_path_buf))
            .collect();

        let second = tree.build(&mut source);
        let again: Vec<_> = (1..=tree.len() as u32)
            .map(|h| tree.path_of(h).map(Path::to_path_buf))
            .collect();

        prop_assert_eq!(second.added, 0);
        prop_assert_eq!(second.registered, first.registered);
        prop_assert_eq!(snapshot, again);
    }
}
