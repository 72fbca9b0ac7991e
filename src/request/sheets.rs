//! Instructions for the spreadsheet API.

use serde::Serialize;
use serde_json::Value;

use super::Request;
use crate::markup::Rgb;

/// A rectangular range of a sheet; unset bounds are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    /// Sheet addressed
    pub sheet_id: i64,

    /// First row (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<u32>,

    /// Last row (exclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<u32>,

    /// First column (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<u32>,

    /// Last column (exclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<u32>,
}

impl GridRange {
    /// The whole sheet.
    pub fn sheet(sheet_id: i64) -> Self {
        Self {
            sheet_id,
            ..Default::default()
        }
    }

    /// One column, rows `[start_row, end_row)`.
    pub fn column(sheet_id: i64, column: u32, start_row: u32, end_row: u32) -> Self {
        Self {
            sheet_id,
            start_row_index: Some(start_row),
            end_row_index: Some(end_row),
            start_column_index: Some(column),
            end_column_index: Some(column + 1),
        }
    }
}

/// `updateCells`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCells {
    /// Cells addressed
    pub range: GridRange,
    /// Field mask; with no rows given the masked fields are cleared
    pub fields: String,
}

/// Sheet dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    /// Row count
    pub row_count: u32,
    /// Column count
    pub column_count: u32,
}

/// Properties of a new sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    /// Tab title
    pub title: String,
    /// Dimensions
    pub grid_properties: GridProperties,
    /// Tab color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<Rgb>,
}

/// `addSheet`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSheet {
    /// New sheet properties
    pub properties: SheetProperties,
}

/// `deleteSheet`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSheet {
    /// Sheet to delete
    pub sheet_id: i64,
}

/// Chart family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartType {
    /// Vertical bars
    #[default]
    Column,
    /// Horizontal bars
    Bar,
    /// Lines
    Line,
    /// Filled areas
    Area,
    /// Points
    Scatter,
    /// Combined series types
    Combo,
    /// Stepped areas
    SteppedArea,
}

/// Series stacking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StackedType {
    /// Series side by side
    #[default]
    NotStacked,
    /// Values added on top of each other
    Stacked,
    /// Stacked and normalized to 100%
    PercentStacked,
}

/// Where the legend is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegendPosition {
    /// Below the chart
    BottomLegend,
    /// Left of the chart
    LeftLegend,
    /// Right of the chart
    RightLegend,
    /// Above the chart
    #[default]
    TopLegend,
    /// No legend
    NoLegend,
}

/// Chart axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisPosition {
    /// Horizontal axis
    BottomAxis,
    /// Vertical axis
    LeftAxis,
    /// Secondary vertical axis
    RightAxis,
}

/// Text formatting of axis labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFormat {
    /// Label color
    pub foreground_color: Rgb,
}

/// Axis configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicChartAxis {
    /// Axis
    pub position: AxisPosition,
    /// Label format
    pub format: TextFormat,
}

/// Source cells of a domain or series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Cell ranges
    pub source_range: ChartSourceRange,
}

/// Wrapper around chart source ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSourceRange {
    /// Cell ranges
    pub sources: Vec<GridRange>,
}

impl ChartData {
    /// Data from a single range.
    pub fn from_range(range: GridRange) -> Self {
        Self {
            source_range: ChartSourceRange {
                sources: vec![range],
            },
        }
    }
}

/// Domain (X values) of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicChartDomain {
    /// Domain cells
    pub domain: ChartData,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicChartSeries {
    /// Series cells
    pub series: ChartData,
    /// Axis the series is measured against
    pub target_axis: AxisPosition,
    /// Series color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

/// Bar, column, line, area and scatter charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicChartSpec {
    /// Chart family
    pub chart_type: ChartType,
    /// Legend placement
    pub legend_position: LegendPosition,
    /// Axis formats
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub axis: Vec<BasicChartAxis>,
    /// X values
    pub domains: Vec<BasicChartDomain>,
    /// Plotted series
    pub series: Vec<BasicChartSeries>,
    /// Header rows in the source ranges
    pub header_count: u32,
    /// Stacking
    pub stacked_type: StackedType,
    /// Smooth lines (line charts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_smoothing: Option<bool>,
}

/// Chart specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    /// Title
    pub title: String,
    /// Background color
    pub background_color: Rgb,
    /// Chart body
    pub basic_chart: BasicChartSpec,
}

/// Cell a floating chart is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCoordinate {
    /// Sheet
    pub sheet_id: i64,
    /// Row
    pub row_index: u32,
    /// Column
    pub column_index: u32,
}

/// Floating placement over the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPosition {
    /// Anchor cell
    pub anchor_cell: GridCoordinate,
    /// Horizontal offset from the anchor, in pixels
    pub offset_x_pixels: u32,
    /// Vertical offset from the anchor, in pixels
    pub offset_y_pixels: u32,
}

/// Chart position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedObjectPosition {
    /// Floating placement
    pub overlay_position: OverlayPosition,
}

/// A chart embedded in a sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedChart {
    /// Specification
    pub spec: ChartSpec,
    /// Placement
    pub position: EmbeddedObjectPosition,
}

/// `addChart`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChart {
    /// New chart
    pub chart: EmbeddedChart,
}

/// Orientation of a value block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    /// Each inner list is a row
    #[default]
    Rows,
    /// Each inner list is a column
    Columns,
}

/// How appended values are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored as-is
    Raw,
    /// Parsed as if typed by a user
    #[default]
    UserEntered,
}

/// Body of a values append.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// Orientation of `values`
    pub major_dimension: Dimension,
    /// Cell values
    pub values: Vec<Vec<Value>>,
}

/// Minimum dimensions of a sheet created for new data.
pub const MIN_ROWS: u32 = 1000;

/// Minimum column count of a sheet created for new data.
pub const MIN_COLUMNS: u32 = 26;

/// Tab color given to sheets created for new data.
pub const NEW_SHEET_TAB_COLOR: Rgb = Rgb {
    red: 1.0,
    green: 0.3,
    blue: 0.4,
};

/// Instruction creating a sheet sized for `rows` x `columns` of data.
///
/// The sheet is never smaller than 1000 rows by 26 columns.
pub fn add_sheet(title: &str, rows: usize, columns: usize) -> Request {
    let rows = u32::try_from(rows).unwrap_or(u32::MAX).max(MIN_ROWS);
    let columns = u32::try_from(columns).unwrap_or(u32::MAX).max(MIN_COLUMNS);
    Request::AddSheet(AddSheet {
        properties: SheetProperties {
            title: title.to_string(),
            grid_properties: GridProperties {
                row_count: rows,
                column_count: columns,
            },
            tab_color: Some(NEW_SHEET_TAB_COLOR),
        },
    })
}

/// Instruction clearing every cell value of a sheet.
pub fn clear_values(sheet_id: i64) -> Request {
    Request::UpdateCells(UpdateCells {
        range: GridRange::sheet(sheet_id),
        fields: "userEnteredValue".to_string(),
    })
}

/// Instruction deleting a sheet.
pub fn delete_sheet(sheet_id: i64) -> Request {
    Request::DeleteSheet(DeleteSheet { sheet_id })
}
