//! Typed snapshots of fetched documents and tabular data.
//!
//! Fetched trees are deserialized once into these types; handles in
//! [`slides`](crate::slides), [`sheets`](crate::sheets) and
//! [`docs`](crate::docs) are built from them. Fields the crate does not
//! interpret (sizes, transforms, styles) are kept as raw JSON so they can
//! be sent back unchanged.

mod document;
mod presentation;
mod spreadsheet;
mod table;

pub use document::{Body, DocumentTree, StructuralElement};
pub use presentation::{
    ImageContent, PageElement, PageTree, PresentationTree, Shape, SheetsChartContent,
    TextContent, TextElement, TextRunContent,
};
pub use spreadsheet::{
    ChartRef, GridSize, SheetTree, SpreadsheetProperties, SpreadsheetTree, TabProperties,
};
pub use table::{CellValue, Column, DataTable, TIMESTAMP_FORMAT};
