//! Typed snapshot of a fetched spreadsheet.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A spreadsheet as returned by the spreadsheet API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetTree {
    /// Spreadsheet ID
    #[serde(default)]
    pub spreadsheet_id: String,

    /// Spreadsheet-level properties
    #[serde(default)]
    pub properties: SpreadsheetProperties,

    /// Sheets (tabs)
    #[serde(default)]
    pub sheets: Vec<SheetTree>,
}

impl SpreadsheetTree {
    /// Deserialize a fetched tree.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::InvalidDocument(format!("unreadable spreadsheet: {}", e)))
    }

    /// Find a sheet by title.
    pub fn sheet(&self, title: &str) -> Option<&SheetTree> {
        self.sheets.iter().find(|s| s.properties.title == title)
    }
}

/// Spreadsheet-level properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetProperties {
    /// Title
    #[serde(default)]
    pub title: String,
}

/// One sheet (tab).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetTree {
    /// Tab properties
    pub properties: TabProperties,

    /// Charts placed on the sheet
    #[serde(default)]
    pub charts: Vec<ChartRef>,
}

/// Properties of a tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabProperties {
    /// Sheet ID
    #[serde(default)]
    pub sheet_id: i64,

    /// Tab title
    pub title: String,

    /// Position among tabs
    #[serde(default)]
    pub index: Option<u32>,

    /// Dimensions
    #[serde(default)]
    pub grid_properties: Option<GridSize>,
}

/// Sheet dimensions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSize {
    /// Row count
    #[serde(default)]
    pub row_count: u32,

    /// Column count
    #[serde(default)]
    pub column_count: u32,
}

/// A chart placed on a sheet.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRef {
    /// Chart ID
    pub chart_id: i64,
}
