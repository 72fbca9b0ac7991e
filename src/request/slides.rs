//! Instructions and builders for the presentation API.

use serde::Serialize;
use serde_json::{json, Value};

use super::Request;
use crate::markup::{self, Rgb, StyleKind, StyleRange};
use crate::sheets::SheetChart;

/// Range addressing inside a shape's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    /// Range type
    #[serde(rename = "type")]
    pub kind: TextRangeType,

    /// Start offset (fixed ranges only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,

    /// End offset, exclusive (fixed ranges only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<u32>,
}

impl TextRange {
    /// The whole text of the shape.
    pub fn all() -> Self {
        Self {
            kind: TextRangeType::All,
            start_index: None,
            end_index: None,
        }
    }

    /// A fixed `[start, end)` range.
    pub fn fixed(start: u32, end: u32) -> Self {
        Self {
            kind: TextRangeType::FixedRange,
            start_index: Some(start),
            end_index: Some(end),
        }
    }
}

/// Kind of text range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextRangeType {
    /// Entire text
    All,
    /// Explicit start and end
    FixedRange,
}

/// `deleteText`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteText {
    /// Shape holding the text
    pub object_id: String,
    /// Text to delete
    pub text_range: TextRange,
}

/// `insertText`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertText {
    /// Shape receiving the text
    pub object_id: String,
    /// Insertion offset
    pub insertion_index: u32,
    /// Inserted text
    pub text: String,
}

/// `updateTextStyle`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyle {
    /// Shape holding the text
    pub object_id: String,
    /// Styled range
    pub text_range: TextRange,
    /// Style object
    pub style: Value,
    /// Field mask of `style` to apply
    pub fields: String,
}

/// How a replacement image is fitted into the existing frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageReplaceMethod {
    /// Scale to fit inside the frame
    #[default]
    CenterInside,
    /// Scale to fill the frame, cropping overflow
    CenterCrop,
}

/// `replaceImage`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceImage {
    /// Image element
    pub image_object_id: String,
    /// Fitting method
    pub image_replace_method: ImageReplaceMethod,
    /// Retrievable URL of the new content
    pub url: String,
}

/// `updateImageProperties`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageProperties {
    /// Image element
    pub object_id: String,
    /// Properties object
    pub image_properties: Value,
    /// Field mask
    pub fields: String,
}

/// `deleteObject`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObject {
    /// Element to delete
    pub object_id: String,
}

/// How an embedded chart follows its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkingMode {
    /// Chart stays linked and can be refreshed
    #[default]
    Linked,
    /// Chart is embedded as a static image
    NotLinkedImage,
}

/// Placement of a new page element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    /// Slide receiving the element
    pub page_object_id: String,
    /// Size object as fetched
    pub size: Value,
    /// Affine transform as fetched
    pub transform: Value,
}

/// `createSheetsChart`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSheetsChart {
    /// ID of the new element
    pub object_id: String,
    /// Source spreadsheet
    pub spreadsheet_id: String,
    /// Chart inside the source spreadsheet
    pub chart_id: i64,
    /// Linking mode
    pub linking_mode: LinkingMode,
    /// Placement
    pub element_properties: ElementProperties,
}

/// `refreshSheetsChart`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSheetsChart {
    /// Linked chart element
    pub object_id: String,
}

/// Change to an image's outbound hyperlink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LinkChange {
    /// Leave the link untouched
    #[default]
    Keep,
    /// Point the image at a URL
    Set(String),
    /// Remove the link
    Clear,
}

impl LinkChange {
    /// `Set` for a non-empty URL, `Clear` otherwise.
    pub fn from_url(url: Option<&str>) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => LinkChange::Set(url.to_string()),
            _ => LinkChange::Clear,
        }
    }
}

fn opaque_color(color: &Rgb) -> Value {
    json!({ "opaqueColor": { "rgbColor": color } })
}

/// Style object and field mask for one markup range.
fn range_style(kind: &StyleKind) -> (Value, &'static str) {
    match kind {
        StyleKind::Bold => (json!({ "bold": true }), "bold"),
        StyleKind::Italic => (json!({ "italic": true }), "italic"),
        StyleKind::Link { url, color: None } => (json!({ "link": { "url": url } }), "link"),
        StyleKind::Link {
            url,
            color: Some(color),
        } => (
            json!({ "link": { "url": url }, "foregroundColor": opaque_color(color) }),
            "link,foregroundColor",
        ),
    }
}

fn style_request(object_id: &str, range: &StyleRange) -> Request {
    let (style, fields) = range_style(&range.kind);
    Request::UpdateTextStyle(UpdateTextStyle {
        object_id: object_id.to_string(),
        text_range: TextRange::fixed(range.span.start, range.span.end),
        style,
        fields: fields.to_string(),
    })
}

/// Instructions replacing the whole text of a shape with `value`.
///
/// `value` may carry markup. The order is: delete, insert clean text,
/// base style over the whole run, then bold, italic and link ranges.
pub fn fill_text(object_id: &str, base_style: &Value, value: &str) -> Vec<Request> {
    let parsed = markup::parse(value);
    let ranges = parsed.style_ranges();

    let mut requests = Vec::with_capacity(3 + ranges.len());
    requests.push(Request::DeleteText(DeleteText {
        object_id: object_id.to_string(),
        text_range: TextRange::all(),
    }));
    requests.push(Request::InsertText(InsertText {
        object_id: object_id.to_string(),
        insertion_index: 0,
        text: parsed.text,
    }));
    requests.push(Request::UpdateTextStyle(UpdateTextStyle {
        object_id: object_id.to_string(),
        text_range: TextRange::all(),
        style: base_style.clone(),
        fields: "*".to_string(),
    }));
    requests.extend(ranges.iter().map(|range| style_request(object_id, range)));
    requests
}

/// Instructions substituting `needle` with `replacement` in `current`.
///
/// The substitution is plain text; the result goes through [`fill_text`].
pub fn replace_text(
    object_id: &str,
    current: &str,
    base_style: &Value,
    needle: &str,
    replacement: &str,
) -> Vec<Request> {
    let new_text = current.replace(needle, replacement);
    fill_text(object_id, base_style, &new_text)
}

/// Instructions swapping an image for the content at `url`.
pub fn replace_image(object_id: &str, url: &str, link: &LinkChange) -> Vec<Request> {
    let mut requests = vec![Request::ReplaceImage(ReplaceImage {
        image_object_id: object_id.to_string(),
        image_replace_method: ImageReplaceMethod::CenterInside,
        url: url.to_string(),
    })];

    let properties = match link {
        LinkChange::Keep => return requests,
        LinkChange::Set(target) => json!({ "link": { "url": target } }),
        LinkChange::Clear => json!({}),
    };
    requests.push(Request::UpdateImageProperties(UpdateImageProperties {
        object_id: object_id.to_string(),
        image_properties: properties,
        fields: "link".to_string(),
    }));
    requests
}

/// Instructions re-linking a chart element to another spreadsheet chart.
///
/// The element is deleted, recreated with the same ID, size and transform,
/// then refreshed.
pub fn replace_chart(
    object_id: &str,
    page_id: &str,
    size: &Value,
    transform: &Value,
    chart: &SheetChart,
) -> Vec<Request> {
    vec![
        Request::DeleteObject(DeleteObject {
            object_id: object_id.to_string(),
        }),
        Request::CreateSheetsChart(CreateSheetsChart {
            object_id: object_id.to_string(),
            spreadsheet_id: chart.spreadsheet_id.clone(),
            chart_id: chart.chart_id,
            linking_mode: LinkingMode::Linked,
            element_properties: ElementProperties {
                page_object_id: page_id.to_string(),
                size: size.clone(),
                transform: transform.clone(),
            },
        }),
        Request::RefreshSheetsChart(RefreshSheetsChart {
            object_id: object_id.to_string(),
        }),
    ]
}
