//! End-to-end demo: a scripted extraction stream narrated by the tracker.
//!
//! Run with: cargo run --example stream_demo -p menu-stream

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use menu_stream::progress::schedules;
use menu_stream::{drive, ExtractionEvent, ExtractionSink, ProgressTracker, StreamParser};

struct PrintSink;

impl ExtractionSink for PrintSink {
    fn on_event(&mut self, event: ExtractionEvent) {
        match event {
            ExtractionEvent::Thinking { message } => println!("  [thinking] {message}"),
            ExtractionEvent::SectionFound { name, confidence } => {
                println!("  section: {name} ({confidence}%)")
            }
            ExtractionEvent::ItemFound { name, price, .. } => {
                println!("    item: {name} @ {price}")
            }
            ExtractionEvent::ProgressUpdate { progress, message } => {
                println!("  [{progress}%] {message}")
            }
            ExtractionEvent::Complete { .. } => {}
            ExtractionEvent::Error { message } => println!("  [error] {message}"),
        }
    }

    fn on_complete(&mut self, result: serde_json::Value) {
        println!("  complete: {result}");
    }
}

#[tokio::main]
async fn main() {
    let transcript = "\
THINKING: Looking at the uploaded menu photo\n\
SECTION: Starters|82\n\
ITEM: Tomato Soup|6.5|With basil oil|88\n\
ITEM: Burrata|11.0||84\n\
PROGRESS: 35\n\
SECTION: Mains|91\n\
ITEM: Ribeye Steak|28.5|Dry-aged, with fries|96\n\
ITEM: Seabass|24.0|Grilled whole|89\n\
PROGRESS: 70\n\
COMPLETE: {\"sections\": 2, \"items\": 4}\n";

    let mut tracker = ProgressTracker::new().with_observer(|update| {
        println!("[{}ms] {} - {}", update.elapsed_ms, update.stage, update.message);
    });
    tracker.start_timed_messages(schedules::digitization_schedule());

    // Simulate the job streaming its output in small bursts.
    let chunks = menu_stream::testing::chunked(transcript, &[40; 12]);
    let stream = async_stream::stream! {
        for chunk in chunks {
            tokio::time::sleep(Duration::from_millis(400)).await;
            yield Ok::<_, std::convert::Infallible>(chunk);
        }
    };

    let mut parser = StreamParser::new(PrintSink);
    if let Err(err) = drive(&mut parser, stream, CancellationToken::new()).await {
        eprintln!("stream failed: {err}");
    }
    tracker.stop_timed_messages();

    let menu = parser.menu();
    println!(
        "\nparsed {} sections, {} items, heuristic progress {}%",
        menu.sections.len(),
        menu.items.len(),
        parser.calculate_progress()
    );
}
