use chrono::{DateTime, Duration, Utc};

/// Tracks when a host was last accessed under its robots.txt policy
///
/// One instance lives next to each cached policy. It starts at the Unix epoch
/// so that the first access to a host is never delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessState {
    /// Instant the last throttled access was released
    pub last_accessed: DateTime<Utc>,
}

impl AccessState {
    /// Creates a new AccessState that has never been accessed
    pub fn new() -> Self {
        Self {
            last_accessed: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Calculates how long to wait before the next access is permitted
    ///
    /// Returns `delay - (now - last_accessed)`, clamped to zero.
    pub fn time_until_next_access(&self, delay: Duration, now: DateTime<Utc>) -> Duration {
        let elapsed = now - self.last_accessed;
        (delay - elapsed).max(Duration::zero())
    }

    /// Records that an access was released at the given instant
    pub fn record_access(&mut self, at: DateTime<Utc>) {
        self.last_accessed = at;
    }
}

impl Default for AccessState {
    fn default() -> Self {
        Self::new()
    }
}
