//! Configuration types for progress tracking.

use std::time::Duration;

/// Configuration for a [`ProgressTracker`](crate::progress::ProgressTracker).
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// How often the timed-message timer polls the schedule.
    ///
    /// Must be shorter than the schedule fire window (3 s) or entries
    /// can be skipped entirely. Default: 500 ms.
    pub poll_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl TrackerConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timer poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
