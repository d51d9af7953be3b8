//! Property tests for quiet-period debouncing through the job loop.

use std::cell::Cell;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use proptest::prelude::*;
use tempfile::TempDir;

use watchsync::domain::ports::{
    ChangeKind, Notification, NotificationSource, SyncError, SyncExecutor, SyncReport,
};
use watchsync::watcher::POLL_INTERVAL;
use watchsync::{JobRuntime, RemoteTarget, SyncSettings, Tick, WatchJob};

/// Source whose pending changes are set from outside.
#[derive(Default)]
struct ScriptedSource {
    pending: Rc<Cell<usize>>,
}

impl NotificationSource for ScriptedSource {
    type Handle = u32;

    fn register(&mut self, _dir: &Path) -> io::Result<u32> {
        Ok(1)
    }

    fn drain(&mut self) -> io::Result<Vec<Notification<u32>>> {
        let n = self.pending.replace(0);
        Ok((0..n)
            .map(|_| Notification {
                handle: Some(1),
                name: None,
                kind: ChangeKind::Modified,
            })
            .collect())
    }
}

struct NoopExecutor;

impl SyncExecutor for NoopExecutor {
    fn sync(&self, _job: &WatchJob) -> Result<SyncReport, SyncError> {
        Ok(SyncReport {
            exit_code: Some(0),
            lines: Vec::new(),
        })
    }
}

/// Run the loop on the polling cadence with changes arriving at the given
/// offsets (ms). Returns the offsets of the ticks that flushed.
fn simulate(quiet_ms: u64, events: &[u64]) -> Vec<u64> {
    let dir = TempDir::new().unwrap();
    let job = WatchJob {
        name: "prop".into(),
        root: dir.path().to_path_buf(),
        quiet_period: Duration::from_millis(quiet_ms),
        sync: SyncSettings {
            remote: RemoteTarget::new(None, "host", "/dst"),
            delete: false,
            excludes: Vec::new(),
            password: None,
        },
    };
    let source = ScriptedSource::default();
    let pending = source.pending.clone();
    let mut runtime = JobRuntime::new(job, source, NoopExecutor);
    runtime.start();

    let cadence = POLL_INTERVAL.as_millis() as u64;
    let end = events.last().copied().unwrap_or(0) + quiet_ms + 3 * cadence;
    let t0 = Instant::now();
    let mut next_event = 0;
    let mut flushes = Vec::new();
    let mut t = 0;
    while t <= end {
        while next_event < events.len() && events[next_event] <= t {
            pending.set(pending.get() + 1);
            next_event += 1;
        }
        if runtime.tick(t0 + Duration::from_millis(t)) == Tick::Flushed {
            flushes.push(t);
        }
        t += cadence;
    }
    flushes
}

fn offsets(start: u64, gaps: &[u64]) -> Vec<u64> {
    let mut at = start;
    let mut out = vec![at];
    for gap in gaps {
        at += gap;
        out.push(at);
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A burst whose gaps are all shorter than the quiet period
    /// produces exactly one flush, no earlier than quiet period after the
    /// last change and at most two polling intervals later.
    #[test]
    fn property_burst_flushes_once(
        quiet_ms in 200u64..=1_500,
        start in 0u64..400,
        gap_fractions in proptest::collection::vec(0.0f64..1.0, 0..12),
    ) {
        let gaps: Vec<u64> = gap_fractions
            .iter()
            .map(|f| (f * quiet_ms as f64) as u64)
            .map(|g| g.min(quiet_ms - 1))
            .collect();
        let events = offsets(start, &gaps);
        let last = *events.last().unwrap();

        let flushes = simulate(quiet_ms, &events);

        prop_assert_eq!(flushes.len(), 1, "flushes: {:?}", flushes);
        let cadence = POLL_INTERVAL.as_millis() as u64;
        prop_assert!(flushes[0] >= last + quiet_ms);
        prop_assert!(flushes[0] <= last + quiet_ms + 2 * cadence);
    }

    /// PROPERTY: Sub-bursts separated by more than the quiet period (plus
    /// the polling slack) flush once each.
    #[test]
    fn property_separated_bursts_flush_once_each(
        quiet_ms in 200u64..=1_000,
        bursts in proptest::collection::vec(
            proptest::collection::vec(0.0f64..1.0, 0..5),
            1..5,
        ),
    ) {
        let cadence = POLL_INTERVAL.as_millis() as u64;
        let separation = quiet_ms + 2 * cadence;

        let mut events = Vec::new();
        let mut start = 0;
        for fractions in &bursts {
            let gaps: Vec<u64> = fractions
                .iter()
                .map(|f| ((f * quiet_ms as f64) as u64).min(quiet_ms - 1))
                .collect();
            let burst = offsets(start, &gaps);
            start = burst.last().unwrap() + separation;
            events.extend(burst);
        }

        let flushes = simulate(quiet_ms, &events);
        prop_assert_eq!(flushes.len(), bursts.len(), "flushes: {:?}", flushes);
    }
}

#[test]
fn scenario_single_write() {
    assert_eq!(simulate(500, &[0]), vec![600]);
}

#[test]
fn scenario_burst_postpones() {
    let flushes = simulate(500, &[0, 300, 600]);
    assert_eq!(flushes.len(), 1);
    assert!(flushes[0] >= 1_100);
}
