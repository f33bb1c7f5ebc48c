//! Progress narration for in-flight extraction jobs.
//!
//! A [`ProgressTracker`] narrates a several-seconds-long external operation
//! to the user: explicit content-derived updates via [`ProgressTracker::send_update`],
//! plus a deterministic, time-indexed schedule of canned messages driven by
//! a recurring timer. The narrative is independent of the job's actual
//! internal state.

pub mod scheduler;
pub mod schedules;

pub use scheduler::{Scheduler, FIRE_WINDOW_MS};

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::types::config::TrackerConfig;
use crate::types::progress::{ProgressUpdate, ScheduleEntry};

/// Observer invoked for every update appended to the log.
pub type Observer = Arc<dyn Fn(&ProgressUpdate) + Send + Sync>;

/// Lifecycle of a tracker's timed-message timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No timer has been started yet.
    Idle,
    /// The recurring timer is active.
    Running,
    /// The timer was stopped.
    Stopped,
}

struct Shared {
    updates: Vec<ProgressUpdate>,
    state: TrackerState,
}

/// Narrates one tracked operation.
///
/// One tracker belongs to exactly one logical extraction run. The update
/// log lives behind a single mutex because the tokio timer task mutates it
/// concurrently with `send_update` callers. Dropping the tracker cancels
/// any live timer.
pub struct ProgressTracker {
    started: Instant,
    poll_interval: Duration,
    observer: Option<Observer>,
    shared: Arc<Mutex<Shared>>,
    timer: Option<CancellationToken>,
}

impl ProgressTracker {
    /// Create a tracker with default configuration.
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Create a tracker with the given configuration.
    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            started: Instant::now(),
            poll_interval: config.poll_interval,
            observer: None,
            shared: Arc::new(Mutex::new(Shared {
                updates: Vec::new(),
                state: TrackerState::Idle,
            })),
            timer: None,
        }
    }

    /// Register an observer invoked synchronously for every update.
    pub fn with_observer(mut self, observer: impl Fn(&ProgressUpdate) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Append an update to the log and notify the observer.
    ///
    /// Callable in any state, including after the timer has stopped.
    pub fn send_update(
        &self,
        stage: impl Into<String>,
        progress: u8,
        message: impl Into<String>,
        metadata: Option<indexmap::IndexMap<String, serde_json::Value>>,
    ) {
        let update = ProgressUpdate {
            stage: stage.into(),
            progress,
            message: message.into(),
            elapsed_ms: self.elapsed_ms(),
            metadata,
        };
        record(&self.shared, &self.observer, update);
    }

    /// Start the recurring timer over `schedule`.
    ///
    /// A prior timer, if any, is cancelled first - at most one live timer
    /// per tracker. Each poll tick asks the [`Scheduler`] whether an entry's
    /// window contains the current elapsed time and forwards the fired
    /// entry as an update.
    pub fn start_timed_messages(&mut self, schedule: Vec<ScheduleEntry>) {
        self.stop_timed_messages();

        let cancel = CancellationToken::new();
        let mut scheduler = Scheduler::new(schedule);
        let shared = Arc::clone(&self.shared);
        let observer = self.observer.clone();
        let started = self.started;
        let poll = self.poll_interval;
        let token = cancel.clone();

        lock(&self.shared).state = TrackerState::Running;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let elapsed_ms = started.elapsed().as_millis() as u64;
                        if let Some(entry) = scheduler.tick(elapsed_ms) {
                            debug!(stage = %entry.stage, elapsed_ms, "timed message fired");
                            let update = ProgressUpdate {
                                stage: entry.stage.clone(),
                                progress: entry.progress,
                                message: entry.message.clone(),
                                elapsed_ms,
                                metadata: None,
                            };
                            record(&shared, &observer, update);
                        }
                    }
                }
            }
        });

        self.timer = Some(cancel);
    }

    /// Cancel the recurring timer. No-op when no timer is active.
    pub fn stop_timed_messages(&mut self) {
        if let Some(cancel) = self.timer.take() {
            cancel.cancel();
            lock(&self.shared).state = TrackerState::Stopped;
        }
    }

    /// Milliseconds since the tracker was constructed.
    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Snapshot of all updates recorded so far.
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        lock(&self.shared).updates.clone()
    }

    /// Current timer lifecycle state.
    pub fn state(&self) -> TrackerState {
        lock(&self.shared).state
    }

    /// Whether the timed-message timer is active.
    pub fn is_running(&self) -> bool {
        self.state() == TrackerState::Running
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.stop_timed_messages();
    }
}

fn record(shared: &Arc<Mutex<Shared>>, observer: &Option<Observer>, update: ProgressUpdate) {
    lock(shared).updates.push(update.clone());
    // Observer runs outside the lock.
    if let Some(observer) = observer {
        observer(&update);
    }
}

fn lock(shared: &Arc<Mutex<Shared>>) -> MutexGuard<'_, Shared> {
    // A poisoned log is still a valid log; keep narrating.
    shared.lock().unwrap_or_else(|e| e.into_inner())
}
