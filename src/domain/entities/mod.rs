//! Domain entities

mod job;
mod roster;

pub use job::{SyncSettings, WatchJob};
pub use roster::{Roster, MAX_JOBS};
