//! Quiet-period debouncing
//!
//! Bursts of changes are coalesced into one flush: every change restarts
//! the countdown, and a flush becomes due only once `quiet_period` has
//! passed without any change.

use std::time::{Duration, Instant};

/// Polling cadence of the job loop.
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Quiet period used when a job does not configure `rsync.delay_ms`.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// Nothing unflushed
    Idle,
    /// At least one change since the last flush
    Pending { last_event: Instant },
}

/// Per-job debounce state machine.
///
/// Time is passed in explicitly so callers (and tests) control the clock.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    state: DebounceState,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            state: DebounceState::Idle,
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// Record a change observed at `now` (IDLE -> PENDING, PENDING -> PENDING).
    pub fn observe(&mut self, now: Instant) {
        self.state = DebounceState::Pending { last_event: now };
    }

    /// True when pending and `now - last_event >= quiet_period`.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.state {
            DebounceState::Idle => false,
            DebounceState::Pending { last_event } => {
                now.saturating_duration_since(last_event) >= self.quiet_period
            }
        }
    }

    /// Back to IDLE after a flush.
    pub fn reset(&mut self) {
        self.state = DebounceState::Idle;
    }
}
