//! Application Layer
//!
//! Use cases that orchestrate the watch-and-mirror flow.
//! This layer:
//! - Depends on Domain layer (entities, ports)
//! - Depends on the watcher for trees and debouncing
//! - Does NOT pick concrete sources or executors (the commands do)
//!
//! ## Use Cases
//!
//! - `JobRuntime` - One job's drain / debounce / flush loop
//! - `Supervisor` - One forked process per job, reaped but never restarted

pub mod runtime;
pub mod supervisor;

pub use runtime::{JobRuntime, Tick};
pub use supervisor::{JobExit, JobOutcome, RunningJobs, Supervisor};
