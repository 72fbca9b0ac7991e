//! Typed snapshot of a fetched text document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A text document as returned by the document API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTree {
    /// Document ID
    #[serde(default)]
    pub document_id: String,

    /// Title
    #[serde(default)]
    pub title: String,

    /// Body
    #[serde(default)]
    pub body: Body,
}

impl DocumentTree {
    /// Deserialize a fetched tree.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::InvalidDocument(format!("unreadable document: {}", e)))
    }

    /// End index of the last structural element (1 for an empty body).
    pub fn end_index(&self) -> u32 {
        self.body
            .content
            .last()
            .map(|element| element.end_index)
            .unwrap_or(1)
    }
}

/// Document body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    /// Paragraphs, tables and section breaks
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// A paragraph, table or section break; only its extent is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralElement {
    /// Start index (absent on the leading section break)
    #[serde(default)]
    pub start_index: Option<u32>,

    /// End index (exclusive)
    #[serde(default)]
    pub end_index: u32,
}
