//! Incremental parser for the extraction stream.
//!
//! Chunks arrive from the transport with arbitrary boundaries; the parser
//! buffers the trailing partial line and decodes every complete line in
//! order, forwarding typed events to a caller-supplied sink. One parser
//! instance belongs to exactly one extraction run and must be fed chunks
//! sequentially; there is no internal locking.

mod driver;

pub use driver::drive;

use tracing::debug;

use crate::events::ExtractionEvent;
use crate::protocol::line::{decode_line, DecodedLine};
use crate::types::menu::{Item, MenuDraft, Section};

/// Receives parser output.
///
/// Both callbacks are invoked synchronously, in line order, from
/// `process_chunk`/`flush`. Implementations must not block indefinitely.
#[cfg_attr(test, mockall::automock)]
pub trait ExtractionSink {
    /// Called for every decoded event except completion.
    fn on_event(&mut self, event: ExtractionEvent);

    /// Called when a well-formed `COMPLETE:` line arrives.
    ///
    /// Only this callback signals completion; the parser never synthesizes
    /// one from its own progress heuristic.
    fn on_complete(&mut self, result: serde_json::Value);
}

/// Incremental, line-buffering parser for one extraction run.
pub struct StreamParser<S> {
    sink: S,
    buffer: String,
    sections: Vec<Section>,
    items: Vec<Item>,
    current_section: Option<usize>,
}

impl<S: ExtractionSink> StreamParser<S> {
    /// Create a parser that forwards events to `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            buffer: String::new(),
            sections: Vec::new(),
            items: Vec::new(),
            current_section: None,
        }
    }

    /// Feed one chunk of streamed text.
    ///
    /// Appends to the internal buffer, processes every complete line in
    /// order, and retains the trailing unterminated segment for the next
    /// chunk. Must be called sequentially for a given parser.
    pub fn process_chunk(&mut self, chunk: &str) {
        self.buffer.push_str(chunk);

        let data = std::mem::take(&mut self.buffer);
        match data.rfind('\n') {
            Some(last) => {
                for line in data[..last].split('\n') {
                    self.process_line(line);
                }
                self.buffer = data[last + 1..].to_string();
            }
            None => self.buffer = data,
        }
    }

    /// Process any remaining buffered content as a final line.
    ///
    /// Must be called once after the source stream ends, or a final
    /// unterminated line is lost. Safe to call again; the buffer is
    /// cleared after processing.
    pub fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = std::mem::take(&mut self.buffer);
        self.process_line(&line);
    }

    /// Heuristic progress estimate from what has been found so far.
    ///
    /// `min(10 + min(sections * 10, 30) + min(items * 2, 50), 90)` - capped
    /// at 90 so a caller can never infer completion from content volume
    /// alone; only an explicit completion callback means done.
    pub fn calculate_progress(&self) -> u8 {
        let sections = (self.sections.len() as u64 * 10).min(30);
        let items = (self.items.len() as u64 * 2).min(50);
        (10 + sections + items).min(90) as u8
    }

    /// Sections found so far, in discovery order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All items found so far, in discovery order, regardless of section.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of sections found so far.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of items found so far.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Snapshot of the accumulated menu.
    pub fn menu(&self) -> MenuDraft {
        MenuDraft {
            sections: self.sections.clone(),
            items: self.items.clone(),
        }
    }

    /// Consume the parser and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn process_line(&mut self, line: &str) {
        match decode_line(line) {
            DecodedLine::Thinking { message } => {
                self.sink.on_event(ExtractionEvent::Thinking { message });
            }
            DecodedLine::Section { name, confidence } => {
                self.sections.push(Section::new(name.clone(), confidence));
                // The previous section simply stops receiving items.
                self.current_section = Some(self.sections.len() - 1);
                debug!(section = %name, total = self.sections.len(), "section found");
                self.sink
                    .on_event(ExtractionEvent::SectionFound { name, confidence });
            }
            DecodedLine::Item {
                name,
                price,
                description,
                confidence,
            } => {
                let item = Item {
                    name: name.clone(),
                    price,
                    description: description.clone(),
                    confidence,
                };
                self.items.push(item.clone());
                if let Some(idx) = self.current_section {
                    self.sections[idx].items.push(item);
                }
                self.sink.on_event(ExtractionEvent::ItemFound {
                    name,
                    price,
                    description,
                    confidence,
                });
            }
            DecodedLine::Progress { percent } => {
                let message = format!("Found {} items so far...", self.items.len());
                self.sink.on_event(ExtractionEvent::ProgressUpdate {
                    progress: percent,
                    message,
                });
            }
            DecodedLine::Complete { result } => {
                debug!(
                    sections = self.sections.len(),
                    items = self.items.len(),
                    "extraction complete"
                );
                self.sink.on_complete(result);
            }
            DecodedLine::Error { message } => {
                self.sink.on_event(ExtractionEvent::Error { message });
            }
            DecodedLine::Ignored => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use mockall::predicate::eq;
    use serde_json::json;

    fn parse_all(input: &str) -> StreamParser<RecordingSink> {
        let mut parser = StreamParser::new(RecordingSink::new());
        parser.process_chunk(input);
        parser.flush();
        parser
    }

    #[test]
    fn items_attach_to_current_section() {
        let parser = parse_all("SECTION: Mains|90\nITEM: Steak|24.5|Grilled|95\n");

        assert_eq!(parser.section_count(), 1);
        assert_eq!(parser.sections()[0].name, "Mains");
        assert_eq!(parser.sections()[0].items.len(), 1);
        assert_eq!(parser.sections()[0].items[0].name, "Steak");
        assert_eq!(parser.sections()[0].items[0].price, 24.5);
        assert_eq!(parser.sections()[0].items[0].confidence, 95);
        assert_eq!(parser.item_count(), 1);
    }

    #[test]
    fn items_before_any_section_stay_unsectioned() {
        let parser = parse_all("ITEM: Bread|2.0||70\nSECTION: Mains|90\n");

        assert_eq!(parser.item_count(), 1);
        assert!(parser.sections()[0].items.is_empty());
        assert_eq!(parser.menu().unsectioned_count(), 1);
    }

    #[test]
    fn section_switch_redirects_items() {
        let parser = parse_all(
            "SECTION: Starters|80\nITEM: Soup|6.5||85\nSECTION: Mains|90\nITEM: Steak|24.5||95\n",
        );

        assert_eq!(parser.sections()[0].items.len(), 1);
        assert_eq!(parser.sections()[1].items.len(), 1);
        assert_eq!(parser.item_count(), 2);
    }

    #[test]
    fn malformed_price_defaults_without_aborting() {
        let parser = parse_all("ITEM: Soup|notanumber||80\n");

        let item = &parser.items()[0];
        assert_eq!(item.name, "Soup");
        assert_eq!(item.price, 0.0);
        assert_eq!(item.confidence, 80);
    }

    #[test]
    fn flush_recovers_final_unterminated_line() {
        let mut parser = StreamParser::new(RecordingSink::new());
        parser.process_chunk("SECTION: Desserts|75");
        assert_eq!(parser.section_count(), 0);

        parser.flush();
        assert_eq!(parser.section_count(), 1);

        // Second flush is a no-op.
        parser.flush();
        assert_eq!(parser.section_count(), 1);
    }

    #[test]
    fn chunk_boundary_mid_line_is_invisible() {
        let mut parser = StreamParser::new(RecordingSink::new());
        parser.process_chunk("SECTION: Sta");
        parser.process_chunk("rters|8");
        parser.process_chunk("5\nITEM: So");
        parser.process_chunk("up|6.5||85\n");
        parser.flush();

        let sink = parser.into_sink();
        assert_eq!(
            sink.events[0],
            ExtractionEvent::SectionFound {
                name: "Starters".to_string(),
                confidence: 85
            }
        );
        assert_eq!(sink.events.len(), 2);
    }

    #[test]
    fn progress_line_reports_running_item_count() {
        let parser = parse_all("ITEM: Soup|6.5||85\nITEM: Bread|2.0||70\nPROGRESS: 40\n");

        let sink = parser.into_sink();
        assert_eq!(
            sink.events[2],
            ExtractionEvent::ProgressUpdate {
                progress: 40,
                message: "Found 2 items so far...".to_string()
            }
        );
    }

    #[test]
    fn well_formed_complete_invokes_callback_once() {
        let mut sink = MockExtractionSink::new();
        sink.expect_on_complete()
            .with(eq(json!({"items": []})))
            .times(1)
            .return_const(());
        sink.expect_on_event().times(0).return_const(());

        let mut parser = StreamParser::new(sink);
        parser.process_chunk("COMPLETE: {\"items\":[]}\n");
        parser.flush();
    }

    #[test]
    fn malformed_complete_is_silently_dropped() {
        let mut sink = MockExtractionSink::new();
        sink.expect_on_complete().times(0).return_const(());
        sink.expect_on_event().times(0).return_const(());

        let mut parser = StreamParser::new(sink);
        parser.process_chunk("COMPLETE: not-json\n");
        parser.flush();
    }

    #[test]
    fn error_line_surfaces_as_event() {
        let parser = parse_all("ERROR: vision service unavailable\n");
        let sink = parser.into_sink();
        assert_eq!(
            sink.events[0],
            ExtractionEvent::Error {
                message: "vision service unavailable".to_string()
            }
        );
    }

    #[test]
    fn calculate_progress_is_monotone_and_capped() {
        let mut parser = StreamParser::new(RecordingSink::new());
        assert_eq!(parser.calculate_progress(), 10);

        let mut last = parser.calculate_progress();
        for i in 0..10 {
            parser.process_chunk(&format!("SECTION: S{i}|50\n"));
            for j in 0..5 {
                parser.process_chunk(&format!("ITEM: I{i}-{j}|1.0||50\n"));
            }
            let now = parser.calculate_progress();
            assert!(now >= last);
            assert!(now <= 90);
            last = now;
        }
        // 10 sections, 50 items: both terms saturated.
        assert_eq!(parser.calculate_progress(), 90);
    }
}
