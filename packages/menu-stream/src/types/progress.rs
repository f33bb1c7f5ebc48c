//! Progress tracking types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A timestamped progress record appended to the tracker's log.
///
/// Distinct from [`ExtractionEvent::ProgressUpdate`](crate::ExtractionEvent):
/// that one carries a percentage reported by the extraction job itself,
/// while this record is produced by the tracker, whether from a timed
/// schedule or an explicit `send_update` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Which phase of the operation this update narrates (e.g. "ocr", "ai")
    pub stage: String,

    /// Progress percentage, 0-100
    pub progress: u8,

    /// User-facing status message
    pub message: String,

    /// Milliseconds since the tracker was constructed
    pub elapsed_ms: u64,

    /// Optional structured context, serialized in insertion order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<IndexMap<String, serde_json::Value>>,
}

/// One entry of a timed message schedule.
///
/// Schedules are plain data tables; the tracker is schedule-agnostic.
/// See [`crate::progress::schedules`] for the canned tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Elapsed time at which this entry becomes eligible to fire
    pub delay_ms: u64,

    /// Stage tag carried into the resulting [`ProgressUpdate`]
    pub stage: String,

    /// Progress percentage carried into the resulting [`ProgressUpdate`]
    pub progress: u8,

    /// User-facing status message
    pub message: String,
}

impl ScheduleEntry {
    /// Create a schedule entry.
    pub fn new(
        delay_ms: u64,
        stage: impl Into<String>,
        progress: u8,
        message: impl Into<String>,
    ) -> Self {
        Self {
            delay_ms,
            stage: stage.into(),
            progress,
            message: message.into(),
        }
    }
}
