//! Chart references and chart-creation options.

use serde::{Deserialize, Serialize};

use crate::markup::Rgb;
use crate::request::sheets::{
    AddChart, AxisPosition, BasicChartAxis, BasicChartDomain, BasicChartSeries, BasicChartSpec,
    ChartData, ChartSpec, ChartType, EmbeddedChart, EmbeddedObjectPosition, GridCoordinate,
    GridRange, LegendPosition, OverlayPosition, StackedType, TextFormat,
};
use crate::request::Request;

/// Horizontal offset of new charts from cell A1, in pixels.
pub const CHART_OFFSET_X: u32 = 500;

/// Vertical offset of new charts from cell A1, in pixels.
pub const CHART_OFFSET_Y: u32 = 100;

/// Reference to a chart living in a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetChart {
    /// Spreadsheet holding the chart
    pub spreadsheet_id: String,
    /// Chart ID inside the spreadsheet
    pub chart_id: i64,
}

impl SheetChart {
    /// Create a reference.
    pub fn new(spreadsheet_id: impl Into<String>, chart_id: i64) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            chart_id,
        }
    }
}

/// Appearance of a chart created from sheet columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Chart family
    pub chart_type: ChartType,

    /// Series stacking
    pub stacked_type: StackedType,

    /// Legend placement; `None` hides the legend
    pub legend_position: Option<LegendPosition>,

    /// Series colors, matched to the Y columns by position; `None` leaves
    /// that series at the service default
    pub colors: Vec<Option<Rgb>>,

    /// Background color
    pub background_color: Rgb,

    /// Axis label color
    pub label_color: Option<Rgb>,

    /// Smooth lines (line charts only)
    pub line_smoothing: bool,

    /// Title
    pub title: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Column,
            stacked_type: StackedType::NotStacked,
            legend_position: Some(LegendPosition::TopLegend),
            colors: Vec::new(),
            background_color: Rgb::WHITE,
            label_color: None,
            line_smoothing: false,
            title: String::new(),
        }
    }
}

impl ChartOptions {
    /// Create default options (column chart, legend on top, white background).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chart family.
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    /// Set the stacking.
    pub fn with_stacked_type(mut self, stacked_type: StackedType) -> Self {
        self.stacked_type = stacked_type;
        self
    }

    /// Set the legend placement (`None` hides it).
    pub fn with_legend(mut self, legend: Option<LegendPosition>) -> Self {
        self.legend_position = legend;
        self
    }

    /// Set series colors from color names or hex codes. An unparseable
    /// entry leaves only its own series uncolored.
    pub fn with_colors<S: AsRef<str>>(mut self, colors: &[S]) -> Self {
        self.colors = colors.iter().map(|c| Rgb::parse(c.as_ref())).collect();
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background_color = color;
        self
    }

    /// Set the axis label color.
    pub fn with_label_color(mut self, color: Rgb) -> Self {
        self.label_color = Some(color);
        self
    }

    /// Enable line smoothing.
    pub fn with_line_smoothing(mut self, smooth: bool) -> Self {
        self.line_smoothing = smooth;
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn target_axis(&self) -> AxisPosition {
        if self.chart_type == ChartType::Bar {
            AxisPosition::BottomAxis
        } else {
            AxisPosition::LeftAxis
        }
    }

    /// Instruction adding a chart of `y_columns` against `x_column`.
    ///
    /// Column indices are zero-based; `row_count` excludes the header row.
    pub fn add_chart_request(
        &self,
        sheet_id: i64,
        x_column: u32,
        y_columns: &[u32],
        row_count: u32,
    ) -> Request {
        let end_row = row_count + 1;
        let series = y_columns
            .iter()
            .enumerate()
            .map(|(i, &column)| BasicChartSeries {
                series: ChartData::from_range(GridRange::column(sheet_id, column, 0, end_row)),
                target_axis: self.target_axis(),
                color: self.colors.get(i).copied().flatten(),
            })
            .collect();

        let axis = match self.label_color {
            Some(color) => [AxisPosition::BottomAxis, AxisPosition::LeftAxis]
                .into_iter()
                .map(|position| BasicChartAxis {
                    position,
                    format: TextFormat {
                        foreground_color: color,
                    },
                })
                .collect(),
            None => Vec::new(),
        };

        let line_smoothing = (self.chart_type == ChartType::Line).then_some(self.line_smoothing);

        Request::AddChart(AddChart {
            chart: EmbeddedChart {
                spec: ChartSpec {
                    title: self.title.clone(),
                    background_color: self.background_color,
                    basic_chart: BasicChartSpec {
                        chart_type: self.chart_type,
                        legend_position: self.legend_position.unwrap_or(LegendPosition::NoLegend),
                        axis,
                        domains: vec![BasicChartDomain {
                            domain: ChartData::from_range(GridRange::column(
                                sheet_id, x_column, 0, end_row,
                            )),
                        }],
                        series,
                        header_count: 1,
                        stacked_type: self.stacked_type,
                        line_smoothing,
                    },
                },
                position: EmbeddedObjectPosition {
                    overlay_position: OverlayPosition {
                        anchor_cell: GridCoordinate {
                            sheet_id,
                            row_index: 0,
                            column_index: 0,
                        },
                        offset_x_pixels: CHART_OFFSET_X,
                        offset_y_pixels: CHART_OFFSET_Y,
                    },
                },
            },
        })
    }
}
