//! Property tests for WatchSync.
//!
//! Properties use randomized event timings to protect the debounce and
//! watch-tree invariants the job loop relies on.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/debounce.rs"]
mod debounce;

#[path = "properties/watch_tree.rs"]
mod watch_tree;
