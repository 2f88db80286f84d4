//! Clock used by post-install convergence polling.
//!
//! Polling sleeps through [`Clock`] so tests can swap in [`RecordingClock`]
//! and run instantly.

use std::cell::RefCell;
use std::time::Duration;

/// Default pause between post-install checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default number of post-install checks before giving up.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 61;

/// Source of blocking sleeps.
pub trait Clock {
    /// Block the current thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Clock backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that records requested sleeps and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingClock {
    sleeps: RefCell<Vec<Duration>>,
}

impl RecordingClock {
    /// Create a clock with no recorded sleeps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sleep requested so far.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    /// Sum of all requested sleeps.
    pub fn elapsed(&self) -> Duration {
        self.sleeps.borrow().iter().sum()
    }
}

impl Clock for RecordingClock {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}
