//! Data types for menu extraction and progress tracking.

pub mod config;
pub mod menu;
pub mod progress;

pub use config::TrackerConfig;
pub use menu::{Item, MenuDraft, Section};
pub use progress::{ProgressUpdate, ScheduleEntry};
