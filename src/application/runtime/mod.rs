//! Job Runtime
//!
//! One watch-and-mirror loop per job:
//! - Drain change notifications from the job's source
//! - Feed them into the quiet-period debouncer
//! - Flush (sync, then rebuild the watch tree) once the tree has been quiet
//!   long enough
//!
//! The loop is single-threaded and never returns; a job ends only when its
//! process is killed.

mod job_runtime;


pub use job_runtime::{JobRuntime, Tick};
