//! Instructions and builders for the text-document API.

use serde::Serialize;
use serde_json::{json, Value};

use super::Request;
use crate::markup::{self, StyleKind};

/// Position inside a document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// UTF-16 index
    pub index: u32,
}

/// `[start, end)` range of a document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRange {
    /// Start index
    pub start_index: u32,
    /// End index (exclusive)
    pub end_index: u32,
}

/// `insertText` (documents)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertDocumentText {
    /// Insertion point
    pub location: Location,
    /// Inserted text
    pub text: String,
}

/// `updateTextStyle` (documents)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentTextStyle {
    /// Styled range
    pub range: DocumentRange,
    /// Style object
    pub text_style: Value,
    /// Field mask
    pub fields: String,
}

/// `deleteContentRange`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteContentRange {
    /// Deleted range
    pub range: DocumentRange,
}

/// Index of the first character of a document body.
pub const BODY_START: u32 = 1;

/// Instruction emptying a body whose last segment ends at `end_index`.
///
/// Returns `None` when the body holds nothing but its final newline.
pub fn clear_body(end_index: u32) -> Option<Request> {
    let end = end_index.saturating_sub(1);
    if end <= BODY_START {
        return None;
    }
    Some(Request::DeleteContentRange(DeleteContentRange {
        range: DocumentRange {
            start_index: BODY_START,
            end_index: end,
        },
    }))
}

fn text_style(kind: &StyleKind) -> (Value, &'static str) {
    match kind {
        StyleKind::Bold => (json!({ "bold": true }), "bold"),
        StyleKind::Italic => (json!({ "italic": true }), "italic"),
        StyleKind::Link { url, color: None } => (json!({ "link": { "url": url } }), "link"),
        StyleKind::Link {
            url,
            color: Some(color),
        } => (
            json!({
                "link": { "url": url },
                "foregroundColor": { "color": { "rgbColor": color } }
            }),
            "link,foregroundColor",
        ),
    }
}

/// Instructions writing `lines` at the start of an empty body.
///
/// Each line may carry markup and is followed by a newline. Style ranges
/// are shifted to the running insertion index.
pub fn write_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Request> {
    let mut requests = Vec::new();
    let mut index = BODY_START;

    for line in lines {
        let parsed = markup::parse(line.as_ref());
        let mut text = parsed.text.clone();
        text.push('\n');
        let length = markup::utf16_len(&text);

        requests.push(Request::InsertDocumentText(InsertDocumentText {
            location: Location { index },
            text,
        }));
        for range in parsed.style_ranges() {
            let (style, fields) = text_style(&range.kind);
            requests.push(Request::UpdateDocumentTextStyle(UpdateDocumentTextStyle {
                range: DocumentRange {
                    start_index: index + range.span.start,
                    end_index: index + range.span.end,
                },
                text_style: style,
                fields: fields.to_string(),
            }));
        }
        index += length;
    }
    requests
}
