//! Inline rich-text markup.
//!
//! Strings passed to text edits may carry `<b>`, `<i>` and
//! `<a href="..." color="...">` tags. The parser strips them and reports
//! the styled ranges over the clean text, which the request builders turn
//! into style instructions.

mod color;
mod parser;

pub use color::Rgb;
pub use parser::{
    parse, utf16_len, LinkSpan, ParsedMarkup, StyleKind, StyleRange, TextSpan,
};
