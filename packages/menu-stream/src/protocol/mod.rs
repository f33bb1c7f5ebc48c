//! The line-oriented extraction wire format.
//!
//! The extraction job streams UTF-8 text where each newline-terminated line
//! is independently self-describing via a fixed prefix keyword:
//!
//! ```text
//! THINKING: <free text>
//! SECTION: <name>|<confidence>
//! ITEM: <name>|<price>|<description>|<confidence>
//! PROGRESS: <percent>
//! COMPLETE: <json object>
//! ERROR: <free text>
//! ```
//!
//! Unrecognized lines are ignored for forward compatibility. Pipe-delimited
//! fields have no escaping mechanism, so they must not contain literal `|`
//! or newline characters; the encoder rejects such values.

pub mod encoder;
pub mod line;

pub use encoder::encode;
pub use line::{
    decode_line, parse_float_or_default, parse_int_or_default, DecodedLine, NUMERIC_DEFAULT,
    PRICE_DEFAULT,
};
