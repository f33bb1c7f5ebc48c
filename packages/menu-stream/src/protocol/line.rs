//! Per-line decoding of the extraction wire format.
//!
//! Decoding is a flat dispatch on the line's prefix keyword, expressed as a
//! tagged variant so new prefixes extend the enum rather than a chain of
//! string comparisons. Decoding never fails: malformed numeric fields
//! default to [`NUMERIC_DEFAULT`]/[`PRICE_DEFAULT`], and anything else that
//! cannot be decoded collapses to [`DecodedLine::Ignored`].

use tracing::warn;

/// Default substituted for any integer field that fails to parse.
pub const NUMERIC_DEFAULT: u8 = 0;

/// Default substituted for any price field that fails to parse.
pub const PRICE_DEFAULT: f64 = 0.0;

/// Parse an integer field, falling back to [`NUMERIC_DEFAULT`].
pub fn parse_int_or_default(field: &str) -> u8 {
    field.trim().parse().unwrap_or(NUMERIC_DEFAULT)
}

/// Parse a price field, falling back to [`PRICE_DEFAULT`].
pub fn parse_float_or_default(field: &str) -> f64 {
    field.trim().parse().unwrap_or(PRICE_DEFAULT)
}

/// One fully decoded protocol line.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedLine {
    /// `THINKING:` - model commentary
    Thinking { message: String },

    /// `SECTION:` - a new menu section was found
    Section { name: String, confidence: u8 },

    /// `ITEM:` - a menu item was found
    Item {
        name: String,
        price: f64,
        description: Option<String>,
        confidence: u8,
    },

    /// `PROGRESS:` - upstream-reported percentage
    Progress { percent: u8 },

    /// `COMPLETE:` - final structured payload
    Complete { result: serde_json::Value },

    /// `ERROR:` - upstream-reported failure
    Error { message: String },

    /// Empty, unrecognized, or undecodable line
    Ignored,
}

/// Decode a single line (without its terminating newline).
///
/// Empty and unrecognized lines decode to [`DecodedLine::Ignored`]. A
/// `COMPLETE:` line whose payload has no `{` or is not valid JSON is
/// logged and also decodes to `Ignored` - the caller will never see a
/// completion for it.
pub fn decode_line(line: &str) -> DecodedLine {
    let line = line.trim();
    if line.is_empty() {
        return DecodedLine::Ignored;
    }

    if let Some(rest) = line.strip_prefix("THINKING:") {
        return DecodedLine::Thinking {
            message: rest.trim().to_string(),
        };
    }

    if let Some(rest) = line.strip_prefix("SECTION:") {
        let mut fields = rest.splitn(2, '|');
        let name = fields.next().unwrap_or("").trim().to_string();
        let confidence = parse_int_or_default(fields.next().unwrap_or(""));
        return DecodedLine::Section { name, confidence };
    }

    if let Some(rest) = line.strip_prefix("ITEM:") {
        let mut fields = rest.splitn(4, '|');
        let name = fields.next().unwrap_or("").trim().to_string();
        let price = parse_float_or_default(fields.next().unwrap_or(""));
        let description = match fields.next().map(str::trim) {
            Some("") | None => None,
            Some(desc) => Some(desc.to_string()),
        };
        let confidence = parse_int_or_default(fields.next().unwrap_or(""));
        return DecodedLine::Item {
            name,
            price,
            description,
            confidence,
        };
    }

    if let Some(rest) = line.strip_prefix("PROGRESS:") {
        return DecodedLine::Progress {
            percent: parse_int_or_default(rest),
        };
    }

    if let Some(rest) = line.strip_prefix("COMPLETE:") {
        let Some(start) = rest.find('{') else {
            warn!(line = %rest.trim(), "COMPLETE line has no JSON object, dropping");
            return DecodedLine::Ignored;
        };
        return match serde_json::from_str(&rest[start..]) {
            Ok(result) => DecodedLine::Complete { result },
            Err(err) => {
                warn!(error = %err, "COMPLETE payload failed to parse, dropping");
                DecodedLine::Ignored
            }
        };
    }

    if let Some(rest) = line.strip_prefix("ERROR:") {
        return DecodedLine::Error {
            message: rest.trim().to_string(),
        };
    }

    DecodedLine::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_thinking() {
        assert_eq!(
            decode_line("THINKING: scanning the photo"),
            DecodedLine::Thinking {
                message: "scanning the photo".to_string()
            }
        );
    }

    #[test]
    fn decodes_section_with_confidence() {
        assert_eq!(
            decode_line("SECTION: Starters|85"),
            DecodedLine::Section {
                name: "Starters".to_string(),
                confidence: 85
            }
        );
    }

    #[test]
    fn section_confidence_defaults_on_garbage() {
        assert_eq!(
            decode_line("SECTION: Starters|high"),
            DecodedLine::Section {
                name: "Starters".to_string(),
                confidence: NUMERIC_DEFAULT
            }
        );
    }

    #[test]
    fn decodes_full_item() {
        assert_eq!(
            decode_line("ITEM: Steak|24.5|Grilled|95"),
            DecodedLine::Item {
                name: "Steak".to_string(),
                price: 24.5,
                description: Some("Grilled".to_string()),
                confidence: 95
            }
        );
    }

    #[test]
    fn item_empty_description_becomes_none() {
        assert_eq!(
            decode_line("ITEM: Soup|notanumber||80"),
            DecodedLine::Item {
                name: "Soup".to_string(),
                price: PRICE_DEFAULT,
                description: None,
                confidence: 80
            }
        );
    }

    #[test]
    fn decodes_progress_percent() {
        assert_eq!(decode_line("PROGRESS: 40"), DecodedLine::Progress { percent: 40 });
        assert_eq!(
            decode_line("PROGRESS: soon"),
            DecodedLine::Progress {
                percent: NUMERIC_DEFAULT
            }
        );
    }

    #[test]
    fn complete_parses_from_first_brace() {
        assert_eq!(
            decode_line(r#"COMPLETE: done {"items":[]}"#),
            DecodedLine::Complete {
                result: json!({"items": []})
            }
        );
    }

    #[test]
    fn complete_without_json_is_dropped() {
        assert_eq!(decode_line("COMPLETE: not-json"), DecodedLine::Ignored);
        assert_eq!(decode_line("COMPLETE: {broken"), DecodedLine::Ignored);
    }

    #[test]
    fn decodes_error_line() {
        assert_eq!(
            decode_line("ERROR: vision service unavailable"),
            DecodedLine::Error {
                message: "vision service unavailable".to_string()
            }
        );
    }

    #[test]
    fn unknown_and_empty_lines_are_ignored() {
        assert_eq!(decode_line(""), DecodedLine::Ignored);
        assert_eq!(decode_line("   "), DecodedLine::Ignored);
        assert_eq!(decode_line("NOTE: future extension"), DecodedLine::Ignored);
        assert_eq!(decode_line("random noise"), DecodedLine::Ignored);
    }
}
