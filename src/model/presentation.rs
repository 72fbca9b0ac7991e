//! Typed snapshot of a fetched presentation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A presentation as returned by the presentation API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationTree {
    /// Presentation ID
    #[serde(default)]
    pub presentation_id: String,

    /// Title
    #[serde(default)]
    pub title: String,

    /// Slides in display order
    #[serde(default)]
    pub slides: Vec<PageTree>,
}

impl PresentationTree {
    /// Deserialize a fetched tree.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::InvalidDocument(format!("unreadable presentation: {}", e)))
    }
}

/// One slide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTree {
    /// Slide object ID
    pub object_id: String,

    /// Elements placed on the slide
    #[serde(default)]
    pub page_elements: Vec<PageElement>,
}

/// An element placed on a slide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    /// Element object ID, unique within the presentation
    pub object_id: String,

    /// Size, kept verbatim
    #[serde(default)]
    pub size: Value,

    /// Affine transform, kept verbatim
    #[serde(default)]
    pub transform: Value,

    /// Title (alt-text title)
    #[serde(default)]
    pub title: Option<String>,

    /// Description (alt-text)
    #[serde(default)]
    pub description: Option<String>,

    /// Shape content, for text boxes and shapes
    #[serde(default)]
    pub shape: Option<Shape>,

    /// Image content
    #[serde(default)]
    pub image: Option<ImageContent>,

    /// Linked spreadsheet chart
    #[serde(default)]
    pub sheets_chart: Option<SheetsChartContent>,
}

/// Shape payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Text inside the shape
    #[serde(default)]
    pub text: Option<TextContent>,
}

/// Text inside a shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    /// Paragraph markers and runs
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
}

/// A paragraph marker, auto text or run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Run of uniformly styled text
    #[serde(default)]
    pub text_run: Option<TextRunContent>,
}

/// Uniformly styled text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRunContent {
    /// Text
    #[serde(default)]
    pub content: String,

    /// Style object, kept verbatim
    #[serde(default)]
    pub style: Value,
}

/// Image payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    /// Short-lived URL of the rendered image
    #[serde(default)]
    pub content_url: Option<String>,

    /// URL the image was inserted from
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Linked chart payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetsChartContent {
    /// Source spreadsheet
    #[serde(default)]
    pub spreadsheet_id: String,

    /// Chart inside the source spreadsheet
    #[serde(default)]
    pub chart_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_tolerates_unknown_fields() {
        let tree = PresentationTree::from_value(json!({
            "presentationId": "p",
            "title": "Deck",
            "locale": "en",
            "slides": [{
                "objectId": "s1",
                "pageElements": [{
                    "objectId": "e1",
                    "shape": {"shapeType": "TEXT_BOX", "text": {"textElements": [
                        {"paragraphMarker": {}},
                        {"textRun": {"content": "Hello\n", "style": {"bold": true}}}
                    ]}}
                }]
            }]
        }))
        .unwrap();

        assert_eq!(tree.title, "Deck");
        let element = &tree.slides[0].page_elements[0];
        let text = element.shape.as_ref().unwrap().text.as_ref().unwrap();
        assert!(text.text_elements[0].text_run.is_none());
        assert_eq!(text.text_elements[1].text_run.as_ref().unwrap().content, "Hello\n");
    }

    #[test]
    fn test_from_value_rejects_wrong_shape() {
        let result = PresentationTree::from_value(json!({"slides": "nope"}));
        assert!(matches!(result, Err(Error::InvalidDocument(_))));
    }
}
