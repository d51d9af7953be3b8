//! Daemon roster - the ordered set of jobs handed to the supervisor.

use super::WatchJob;

/// Upper bound on jobs (and therefore forked processes) per daemon.
pub const MAX_JOBS: usize = 64;

/// Non-empty, ordered, immutable collection of jobs.
///
/// Construction is the only place emptiness is checked: a `Roster` value
/// always holds at least one job.
#[derive(Debug, Clone)]
pub struct Roster {
    jobs: Vec<WatchJob>,
}

impl Roster {
    /// Returns `None` for an empty job list.
    pub fn new(jobs: Vec<WatchJob>) -> Option<Self> {
        if jobs.is_empty() {
            None
        } else {
            Some(Self { jobs })
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn jobs(&self) -> &[WatchJob] {
        &self.jobs
    }
}

impl IntoIterator for Roster {
    type Item = WatchJob;
    type IntoIter = std::vec::IntoIter<WatchJob>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.into_iter()
    }
}
