//! Crawl-delay throttling
//!
//! When a check is allowed and an applicable group declares `Crawl-delay`,
//! the calling thread is blocked until the delay since the previous allowed
//! access to that host has passed. There is no cancellation; callers that
//! must stay responsive should run checks on a dedicated worker.

use crate::robots::parser::PolicySet;
use crate::state::AccessState;
use chrono::{DateTime, Duration, Utc};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Largest crawl delay honoured, in seconds
const MAX_DELAY_SECS: u64 = u32::MAX as u64;

/// Source of time and blocking sleeps for the throttle
pub trait Clock {
    /// Returns the current instant
    fn now(&self) -> DateTime<Utc>;

    /// Blocks the calling thread for the given duration
    fn sleep(&self, duration: std::time::Duration);
}

/// The wall clock, sleeping with `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: std::time::Duration) {
        std::thread::sleep(duration);
    }
}

/// A clock that only moves when told to
///
/// Sleeping advances the clock instead of blocking and records the requested
/// duration. Clones share the same time, so a test can keep one handle while
/// a [`crate::Robots`] owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Rc<RefCell<ManualState>>,
}

#[derive(Debug)]
struct ManualState {
    now: DateTime<Utc>,
    sleeps: Vec<std::time::Duration>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ManualState {
                now: start,
                sleeps: Vec::new(),
            })),
        }
    }

    /// Moves the clock forward without recording a sleep
    pub fn advance(&self, by: Duration) {
        self.inner.borrow_mut().now += by;
    }

    /// Every sleep requested so far, in order
    pub fn sleeps(&self) -> Vec<std::time::Duration> {
        self.inner.borrow().sleeps.clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.inner.borrow().now
    }

    fn sleep(&self, duration: std::time::Duration) {
        let mut state = self.inner.borrow_mut();
        state.now += Duration::from_std(duration).unwrap_or_else(|_| Duration::zero());
        state.sleeps.push(duration);
    }
}

/// Applies the crawl delay declared for `user_agent`, blocking if needed
///
/// The delay is looked up by testing the agent string against every group's
/// agent pattern. If one applies, the caller waits for whatever remains of
/// it since `state.last_accessed`, and `state` is moved to the instant the
/// wait ends.
///
/// # Returns
///
/// * `Some(Duration)` - How long the caller was blocked (possibly zero)
/// * `None` - If no applicable group declares a crawl delay
pub fn apply_delay<C: Clock + ?Sized>(
    policy: &PolicySet,
    state: &mut AccessState,
    user_agent: &str,
    clock: &C,
) -> Option<std::time::Duration> {
    let delay_secs = policy.crawl_delay(user_agent)?.min(MAX_DELAY_SECS);
    let delay = Duration::seconds(delay_secs as i64);

    let now = clock.now();
    let wait = state.time_until_next_access(delay, now);
    let wait_std = wait.to_std().unwrap_or_default();

    if !wait_std.is_zero() {
        debug!(
            "Crawl-delay {}s for {}: waiting {:?}",
            delay_secs, user_agent, wait_std
        );
        clock.sleep(wait_std);
    }

    state.record_access(now + wait);
    Some(wait_std)
}
