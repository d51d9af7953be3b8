//! Job runtime implementation

use std::thread;
use std::time::Instant;

use tracing::{debug, error, info, info_span, trace, warn, Span};

use crate::domain::entities::WatchJob;
use crate::domain::ports::{ChangeKind, NotificationSource, SyncExecutor, SyncReport};
use crate::watcher::{Debouncer, WatchTree, POLL_INTERVAL};

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing unflushed
    Idle,
    /// Changes seen, quiet period still running
    Pending,
    /// A flush ran during this tick
    Flushed,
}

/// Owns everything one job needs: its notification source, watch tree,
/// debouncer and sync executor. Nothing here is shared with other jobs.
pub struct JobRuntime<S: NotificationSource, E: SyncExecutor> {
    job: WatchJob,
    source: S,
    tree: WatchTree<S::Handle>,
    debouncer: Debouncer,
    executor: E,
    span: Span,
}

impl<S, E> JobRuntime<S, E>
where
    S: NotificationSource,
    E: SyncExecutor,
{
    pub fn new(job: WatchJob, source: S, executor: E) -> Self {
        let span = info_span!("job", name = %job.name);
        Self {
            tree: WatchTree::new(job.root.clone()),
            debouncer: Debouncer::new(job.quiet_period),
            span,
            job,
            source,
            executor,
        }
    }

    pub fn job(&self) -> &WatchJob {
        &self.job
    }

    pub fn tree(&self) -> &WatchTree<S::Handle> {
        &self.tree
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Build the initial watch tree.
    pub fn start(&mut self) {
        let span = self.span.clone();
        let _guard = span.enter();

        let stats = self.tree.build(&mut self.source);
        info!("Monitoring {}", self.job.root.display());
        debug!(
            "watching {} directories ({} skipped)",
            stats.registered, stats.skipped
        );
    }

    /// One iteration: drain, debounce, maybe flush. `now` is the loop's
    /// clock reading for this iteration.
    pub fn tick(&mut self, now: Instant) -> Tick {
        let span = self.span.clone();
        let _guard = span.enter();

        match self.source.drain() {
            Ok(events) if !events.is_empty() => {
                if events.iter().any(|e| e.kind == ChangeKind::Overflow) {
                    warn!("notification queue overflowed, some changes may be mirrored late");
                }
                trace!("{} change notifications", events.len());
                self.debouncer.observe(now);
            }
            Ok(_) => {}
            Err(err) => warn!("failed to read change notifications: {}", err),
        }

        if self.debouncer.is_due(now) {
            self.flush();
            Tick::Flushed
        } else if self.debouncer.is_pending() {
            Tick::Pending
        } else {
            Tick::Idle
        }
    }

    /// Run the job forever.
    pub fn run(mut self) -> ! {
        self.start();
        loop {
            self.tick(Instant::now());
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Sync, return to idle, then pick up directories created meanwhile.
    fn flush(&mut self) {
        match self.executor.sync(&self.job) {
            Ok(report) => log_report(&report),
            Err(err) => error!("{}", err),
        }
        self.debouncer.reset();

        let stats = self.tree.build(&mut self.source);
        if stats.added > 0 {
            debug!("now watching {} new directories", stats.added);
        }
    }
}

fn log_report(report: &SyncReport) {
    if report.has_changes() {
        info!("=== RSYNC START ===");
        for line in &report.lines {
            info!("{}", line);
        }
    }

    match report.exit_code {
        Some(0) if report.has_changes() => info!("=== RSYNC OK ==="),
        Some(0) => debug!("nothing to transfer"),
        Some(code) => error!("=== RSYNC ERROR (exit code {}) ===", code),
        None => error!("=== RSYNC ERROR (terminated by signal) ==="),
    }
}
