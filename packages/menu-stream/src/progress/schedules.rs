//! Canned message schedules for the menu-digitization flow.
//!
//! These are plain data tables, not control logic; the tracker itself is
//! schedule-agnostic and an application can supply its own tables instead.

use crate::types::progress::ScheduleEntry;

/// Status narrative for a typical digitization run.
///
/// Covers the OCR, AI-extraction, merge and save phases on a timeline
/// tuned to how long each phase usually takes. Progress values stay below
/// 100; completion is only ever signaled by the job itself.
pub fn digitization_schedule() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry::new(0, "ocr", 5, "Reading your menu photo..."),
        ScheduleEntry::new(4_000, "ocr", 15, "Transcribing menu text..."),
        ScheduleEntry::new(8_000, "ai", 30, "Understanding menu structure..."),
        ScheduleEntry::new(12_000, "ai", 50, "Identifying sections and dishes..."),
        ScheduleEntry::new(16_000, "ai", 65, "Matching prices to dishes..."),
        ScheduleEntry::new(20_000, "merge", 80, "Combining results..."),
        ScheduleEntry::new(24_000, "save", 90, "Saving your menu..."),
    ]
}

/// Escalating warnings for runs that exceed the usual duration.
pub fn timeout_warnings() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry::new(
            15_000,
            "timeout",
            80,
            "This is taking a bit longer than usual...",
        ),
        ScheduleEntry::new(
            30_000,
            "timeout",
            85,
            "Still working - large menus can take a while...",
        ),
        ScheduleEntry::new(
            45_000,
            "timeout",
            90,
            "Almost there, thanks for your patience...",
        ),
    ]
}
