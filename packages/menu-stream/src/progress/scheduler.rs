//! Pure stepping core for timed message schedules.

use crate::types::progress::ScheduleEntry;

/// How long a schedule entry remains eligible after its delay elapses.
///
/// An entry whose window `[delay_ms, delay_ms + FIRE_WINDOW_MS)` passes
/// entirely between ticks is skipped, never fired retroactively.
pub const FIRE_WINDOW_MS: u64 = 3000;

/// Steps through a schedule as elapsed time advances.
///
/// The "last fired" index is explicit state so the scheduler can be driven
/// by any clock - the tracker's timer task in production, a plain loop over
/// fake elapsed values in tests.
#[derive(Debug)]
pub struct Scheduler {
    entries: Vec<ScheduleEntry>,
    last_fired: Option<usize>,
}

impl Scheduler {
    /// Create a scheduler over the given entries.
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self {
            entries,
            last_fired: None,
        }
    }

    /// Advance to `elapsed_ms` and return the entry to fire, if any.
    ///
    /// Returns the first entry in schedule order whose window contains
    /// `elapsed_ms` and which is not the last entry fired - earliest-listed
    /// wins when windows overlap, and at most one entry fires per tick.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<&ScheduleEntry> {
        let idx = self
            .entries
            .iter()
            .position(|e| elapsed_ms >= e.delay_ms && elapsed_ms < e.delay_ms + FIRE_WINDOW_MS)?;

        if self.last_fired == Some(idx) {
            return None;
        }
        self.last_fired = Some(idx);
        Some(&self.entries[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(delay_ms: u64, message: &str) -> ScheduleEntry {
        ScheduleEntry::new(delay_ms, "test", 50, message)
    }

    #[test]
    fn fires_each_entry_at_most_once() {
        let mut scheduler = Scheduler::new(vec![entry(0, "first"), entry(5000, "second")]);

        assert_eq!(scheduler.tick(100).map(|e| e.message.as_str()), Some("first"));
        assert_eq!(scheduler.tick(600), None);
        assert_eq!(scheduler.tick(1100), None);
        assert_eq!(
            scheduler.tick(5200).map(|e| e.message.as_str()),
            Some("second")
        );
        assert_eq!(scheduler.tick(5700), None);
    }

    #[test]
    fn missed_window_is_skipped_forever() {
        let mut scheduler = Scheduler::new(vec![entry(0, "first"), entry(5000, "second")]);

        // Clock jumps straight past the first window.
        assert_eq!(
            scheduler.tick(6000).map(|e| e.message.as_str()),
            Some("second")
        );
        assert_eq!(scheduler.tick(6500), None);
        // The first entry's window is long gone.
        assert_eq!(scheduler.tick(7000), None);
    }

    #[test]
    fn overlapping_windows_prefer_earliest_listed() {
        let mut scheduler = Scheduler::new(vec![entry(1000, "a"), entry(2000, "b")]);

        // 2500 is inside both [1000, 4000) and [2000, 5000).
        assert_eq!(scheduler.tick(2500).map(|e| e.message.as_str()), Some("a"));
        // Still inside both windows; "a" remains the first match and was
        // the last fired, so nothing fires.
        assert_eq!(scheduler.tick(3000), None);
        // Once "a"'s window closes, "b" becomes the first match.
        assert_eq!(scheduler.tick(4000).map(|e| e.message.as_str()), Some("b"));
    }

    #[test]
    fn nothing_fires_outside_all_windows() {
        let mut scheduler = Scheduler::new(vec![entry(5000, "later")]);

        assert_eq!(scheduler.tick(0), None);
        assert_eq!(scheduler.tick(4999), None);
        assert_eq!(scheduler.tick(8000), None);
    }

    #[test]
    fn empty_schedule_never_fires() {
        let mut scheduler = Scheduler::new(Vec::new());
        assert_eq!(scheduler.tick(0), None);
        assert_eq!(scheduler.tick(60_000), None);
    }
}
