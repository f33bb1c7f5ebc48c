//! Testing utilities including a recording sink and chunking helpers.
//!
//! These are useful for testing applications that consume the parser
//! without wiring up a real extraction job.

use futures::Stream;

use crate::events::ExtractionEvent;
use crate::parser::ExtractionSink;

/// A sink that records everything the parser emits.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Every event, in emission order
    pub events: Vec<ExtractionEvent>,

    /// Every completion payload (a well-behaved stream produces at most one)
    pub completions: Vec<serde_json::Value>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExtractionSink for RecordingSink {
    fn on_event(&mut self, event: ExtractionEvent) {
        self.events.push(event);
    }

    fn on_complete(&mut self, result: serde_json::Value) {
        self.completions.push(result);
    }
}

/// Split `input` into chunks of the given character counts.
///
/// The final chunk takes whatever remains, so the concatenation of the
/// returned chunks is always `input`. Splits are char-aligned, which lets
/// tests cut lines at arbitrary points without breaking UTF-8.
pub fn chunked(input: &str, sizes: &[usize]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = input;
    for &size in sizes {
        if rest.is_empty() {
            break;
        }
        let at = rest
            .char_indices()
            .nth(size)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(at);
        chunks.push(head.to_string());
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}

/// Build a chunk stream that yields the given chunks in order.
pub fn scripted_chunks(
    chunks: Vec<String>,
) -> impl Stream<Item = Result<String, std::convert::Infallible>> {
    async_stream::stream! {
        for chunk in chunks {
            yield Ok(chunk);
        }
    }
}
