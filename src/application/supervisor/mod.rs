//! Daemon Supervisor
//!
//! Runs every job of a roster in its own forked process and waits for all
//! of them. Jobs share nothing after the fork, so one job dying (or never
//! starting) leaves the others untouched. Exited jobs are reported, never
//! restarted.

use std::convert::Infallible;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::process;

use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult, Pid};
use tracing::{error, info, warn};

use crate::domain::entities::{Roster, WatchJob};
use crate::error::{WatchSyncError, WatchSyncResult};

/// How a job process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Exited(i32),
    Signaled(Signal),
    /// `waitpid` failed for a reason other than interruption
    Unknown,
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobOutcome::Exited(code) => write!(f, "exit code {}", code),
            JobOutcome::Signaled(signal) => write!(f, "signal {}", signal),
            JobOutcome::Unknown => write!(f, "unknown status"),
        }
    }
}

/// A reaped job process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobExit {
    pub name: String,
    pub pid: Pid,
    pub outcome: JobOutcome,
}

pub struct Supervisor {
    roster: Roster,
}

/// Job processes started by [`Supervisor::spawn_all`].
#[derive(Debug)]
pub struct RunningJobs {
    children: Vec<(String, Pid)>,
}

impl Supervisor {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    /// Fork one process per job, in roster order, and run `body` in each.
    ///
    /// `body` owns the child: it is expected never to return successfully.
    /// If it returns an error or panics, the child logs it and exits with
    /// status 1 without unwinding back into this loop.
    /// A failed fork skips that job; it is an error only if no job could
    /// be started at all.
    pub fn spawn_all<F>(self, body: F) -> WatchSyncResult<RunningJobs>
    where
        F: Fn(WatchJob) -> WatchSyncResult<Infallible>,
    {
        let mut children = Vec::with_capacity(self.roster.len());
        let mut last_error = None;

        for job in self.roster {
            let name = job.name.clone();
            // SAFETY: the child only runs `body` and then exits; it never
            // returns into the parent's control flow.
            match unsafe { fork() } {
                Ok(ForkResult::Parent { child }) => children.push((name, child)),
                Ok(ForkResult::Child) => run_child(job, &body),
                Err(source) => {
                    error!("failed to start job '{}': {}", name, source);
                    last_error = Some(WatchSyncError::Fork { job: name, source });
                }
            }
        }

        match (children.is_empty(), last_error) {
            (true, Some(err)) => Err(err),
            _ => Ok(RunningJobs { children }),
        }
    }
}

impl RunningJobs {
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.children.iter().map(|(_, pid)| *pid)
    }

    /// Block until every job process has ended, in start order.
    pub fn wait_all(self) -> Vec<JobExit> {
        self.children
            .into_iter()
            .map(|(name, pid)| {
                let outcome = reap(pid);
                match outcome {
                    JobOutcome::Exited(0) => info!("job '{}' (pid {}) exited", name, pid),
                    _ => warn!("job '{}' (pid {}) ended with {}", name, pid, outcome),
                }
                JobExit { name, pid, outcome }
            })
            .collect()
    }
}

fn run_child<F>(job: WatchJob, body: &F) -> !
where
    F: Fn(WatchJob) -> WatchSyncResult<Infallible>,
{
    let name = job.name.clone();
    match panic::catch_unwind(AssertUnwindSafe(|| body(job))) {
        Ok(Ok(never)) => match never {},
        Ok(Err(err)) => error!("job '{}' stopped: {}", name, err),
        Err(_) => error!("job '{}' panicked", name),
    }
    process::exit(1)
}

fn reap(pid: Pid) -> JobOutcome {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => return JobOutcome::Exited(code),
            Ok(WaitStatus::Signaled(_, signal, _)) => return JobOutcome::Signaled(signal),
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(err) => {
                warn!("waitpid({}) failed: {}", pid, err);
                return JobOutcome::Unknown;
            }
        }
    }
}
