//! Wire-level edit instructions.
//!
//! Each [`Request`] serializes to exactly one entry of a remote
//! `batchUpdate` call (`{"deleteText": {...}}`, `{"addSheet": {...}}`, ...).
//! The builder functions in the submodules produce the ordered instruction
//! lists for each semantic edit; nothing here performs I/O.

pub mod docs;
pub mod sheets;
pub mod slides;

use serde::Serialize;

pub use docs::{
    DeleteContentRange, DocumentRange, InsertDocumentText, Location, UpdateDocumentTextStyle,
};
pub use sheets::{
    AddChart, AddSheet, AxisPosition, ChartType, DeleteSheet, Dimension, GridRange,
    LegendPosition, StackedType, UpdateCells, ValueInputOption, ValueRange,
};
pub use slides::{
    CreateSheetsChart, DeleteObject, DeleteText, ImageReplaceMethod, InsertText, LinkChange,
    RefreshSheetsChart, ReplaceImage, TextRange, UpdateImageProperties, UpdateTextStyle,
};

/// One atomic edit understood by a remote batch-update call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    /// Delete text inside a slides shape
    DeleteText(DeleteText),

    /// Insert text into a slides shape
    InsertText(InsertText),

    /// Style a range of text inside a slides shape
    UpdateTextStyle(UpdateTextStyle),

    /// Swap the content of a slides image
    ReplaceImage(ReplaceImage),

    /// Update the properties (outbound link) of a slides image
    UpdateImageProperties(UpdateImageProperties),

    /// Delete a slides page element
    DeleteObject(DeleteObject),

    /// Embed a spreadsheet chart into a slide
    CreateSheetsChart(CreateSheetsChart),

    /// Refresh a linked spreadsheet chart
    RefreshSheetsChart(RefreshSheetsChart),

    /// Rewrite (or clear) cells of a sheet
    UpdateCells(UpdateCells),

    /// Add a sheet to a spreadsheet
    AddSheet(AddSheet),

    /// Delete a sheet from a spreadsheet
    DeleteSheet(DeleteSheet),

    /// Add a chart to a sheet
    AddChart(AddChart),

    /// Insert text into a text document
    #[serde(rename = "insertText")]
    InsertDocumentText(InsertDocumentText),

    /// Style a range of a text document
    #[serde(rename = "updateTextStyle")]
    UpdateDocumentTextStyle(UpdateDocumentTextStyle),

    /// Delete a range of a text document
    DeleteContentRange(DeleteContentRange),
}

impl Request {
    /// Wire name of this instruction.
    pub fn name(&self) -> &'static str {
        match self {
            Request::DeleteText(_) => "deleteText",
            Request::InsertText(_) | Request::InsertDocumentText(_) => "insertText",
            Request::UpdateTextStyle(_) | Request::UpdateDocumentTextStyle(_) => {
                "updateTextStyle"
            }
            Request::ReplaceImage(_) => "replaceImage",
            Request::UpdateImageProperties(_) => "updateImageProperties",
            Request::DeleteObject(_) => "deleteObject",
            Request::CreateSheetsChart(_) => "createSheetsChart",
            Request::RefreshSheetsChart(_) => "refreshSheetsChart",
            Request::UpdateCells(_) => "updateCells",
            Request::AddSheet(_) => "addSheet",
            Request::DeleteSheet(_) => "deleteSheet",
            Request::AddChart(_) => "addChart",
            Request::DeleteContentRange(_) => "deleteContentRange",
        }
    }
}

/// Serialize instructions into a `batchUpdate` request body.
pub fn batch_body(requests: &[Request]) -> serde_json::Result<serde_json::Value> {
    Ok(serde_json::json!({ "requests": serde_json::to_value(requests)? }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_externally_tagged() {
        let request = Request::DeleteObject(DeleteObject {
            object_id: "chart_1".into(),
        });
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"deleteObject": {"objectId": "chart_1"}}));
        assert_eq!(request.name(), "deleteObject");
    }

    #[test]
    fn test_batch_body() {
        let body = batch_body(&[Request::RefreshSheetsChart(RefreshSheetsChart {
            object_id: "c".into(),
        })])
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"requests": [{"refreshSheetsChart": {"objectId": "c"}}]})
        );
    }
}
