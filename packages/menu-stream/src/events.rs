//! Extraction lifecycle events.
//!
//! These events are facts about what the extraction job has found so far,
//! not commands. They are emitted synchronously by the parser as lines are
//! decoded, and are serializable so an application can forward them as-is
//! over SSE or a job-event channel.

use serde::{Deserialize, Serialize};

/// An event decoded from the extraction stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractionEvent {
    /// The model is reasoning out loud; useful as a liveness signal.
    Thinking { message: String },

    /// A menu section was detected.
    SectionFound { name: String, confidence: u8 },

    /// A menu item was detected.
    ItemFound {
        name: String,
        price: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        confidence: u8,
    },

    /// Upstream-reported progress percentage.
    ///
    /// Carries the percentage the job itself reported, not the parser's
    /// own [`calculate_progress`](crate::parser::StreamParser::calculate_progress)
    /// heuristic.
    ProgressUpdate { progress: u8, message: String },

    /// The job finished and produced its final structured payload.
    Complete { result: serde_json::Value },

    /// The job reported a failure.
    Error { message: String },
}
