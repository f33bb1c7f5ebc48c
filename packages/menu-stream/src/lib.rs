//! Streaming Menu-Extraction Library
//!
//! Consumes the token stream of a running menu-digitization job and
//! incrementally reconstructs structured menu data (sections, items,
//! prices, confidence scores) while emitting typed progress events.
//!
//! # Design Philosophy
//!
//! **"Signal, not policy"**
//!
//! - The parser decodes and accumulates; retry, abort and display
//!   decisions belong to the application
//! - Malformed input degrades (defaults, dropped lines), it never aborts
//!   a running stream
//! - Completion is only ever signaled by the job itself, never inferred
//!   from content volume
//!
//! # Usage
//!
//! ```rust,ignore
//! use menu_stream::{drive, ProgressTracker, StreamParser};
//! use menu_stream::progress::schedules;
//! use menu_stream::testing::{scripted_chunks, RecordingSink};
//! use tokio_util::sync::CancellationToken;
//!
//! let mut tracker = ProgressTracker::new();
//! tracker.start_timed_messages(schedules::digitization_schedule());
//!
//! let mut parser = StreamParser::new(RecordingSink::new());
//! drive(&mut parser, scripted_chunks(chunks), CancellationToken::new()).await?;
//!
//! tracker.stop_timed_messages();
//! let menu = parser.menu();
//! ```
//!
//! # Modules
//!
//! - [`events`] - Typed events decoded from the stream
//! - [`protocol`] - The line-oriented wire format (decode + encode)
//! - [`parser`] - Incremental chunk parser and async stream driver
//! - [`progress`] - Progress tracker, scheduler, canned schedules
//! - [`types`] - Menu and progress data types
//! - [`testing`] - Recording sink and chunking helpers

pub mod error;
pub mod events;
pub mod parser;
pub mod progress;
pub mod protocol;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use error::{ProtocolError, ProtocolResult, StreamError, StreamResult};
pub use events::ExtractionEvent;
pub use parser::{drive, ExtractionSink, StreamParser};
pub use progress::{ProgressTracker, Scheduler, TrackerState, FIRE_WINDOW_MS};
pub use protocol::{decode_line, encode, DecodedLine};
pub use types::{Item, MenuDraft, ProgressUpdate, ScheduleEntry, Section, TrackerConfig};
