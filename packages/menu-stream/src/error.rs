//! Typed errors for the menu-stream library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Note that malformed *input* lines are not errors: numeric fields that
//! fail to parse default to zero, unrecognized prefixes are ignored, and a
//! malformed `COMPLETE:` payload is logged and dropped. Only the encoder
//! and the async stream driver have failure modes worth typing.

use thiserror::Error;

/// Errors that can occur when encoding protocol lines.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A field contains a character the wire format cannot carry.
    ///
    /// Pipe-delimited fields have no escaping mechanism, so a literal `|`
    /// or newline would corrupt the framing of the line.
    #[error("invalid {field} field: contains '|' or newline: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// Completion payload could not be serialized to JSON
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors that can occur while driving a chunk stream into the parser.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The chunk transport failed
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,
}

/// Result type alias for protocol encoding.
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Result type alias for stream driving.
pub type StreamResult<T> = std::result::Result<T, StreamError>;
