//! Companion encoder for the extraction wire format.
//!
//! Used by extraction jobs (or test fixtures standing in for them) to emit
//! lines the parser can decode. The format defines no escaping, so field
//! values that would corrupt framing are rejected outright.

use crate::error::{ProtocolError, ProtocolResult};
use crate::events::ExtractionEvent;

/// Encode an event as a single protocol line, terminated by `\n`.
///
/// `ProgressUpdate` encodes only its percentage; the message is synthesized
/// on the decoding side. Returns [`ProtocolError::InvalidField`] if a
/// pipe-delimited field contains a literal `|` or newline, or if a free-text
/// field contains a newline.
pub fn encode(event: &ExtractionEvent) -> ProtocolResult<String> {
    match event {
        ExtractionEvent::Thinking { message } => {
            check_text("message", message)?;
            Ok(format!("THINKING: {message}\n"))
        }
        ExtractionEvent::SectionFound { name, confidence } => {
            check_delimited("name", name)?;
            Ok(format!("SECTION: {name}|{confidence}\n"))
        }
        ExtractionEvent::ItemFound {
            name,
            price,
            description,
            confidence,
        } => {
            check_delimited("name", name)?;
            let description = description.as_deref().unwrap_or("");
            check_delimited("description", description)?;
            Ok(format!("ITEM: {name}|{price}|{description}|{confidence}\n"))
        }
        ExtractionEvent::ProgressUpdate { progress, .. } => Ok(format!("PROGRESS: {progress}\n")),
        ExtractionEvent::Complete { result } => {
            let payload = serde_json::to_string(result)?;
            Ok(format!("COMPLETE: {payload}\n"))
        }
        ExtractionEvent::Error { message } => {
            check_text("message", message)?;
            Ok(format!("ERROR: {message}\n"))
        }
    }
}

fn check_delimited(field: &'static str, value: &str) -> ProtocolResult<()> {
    if value.contains('|') || value.contains('\n') {
        return Err(ProtocolError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_text(field: &'static str, value: &str) -> ProtocolResult<()> {
    if value.contains('\n') {
        return Err(ProtocolError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
