//! A single sheet (tab) of a spreadsheet.

use std::sync::Arc;

use crate::config::Config;
use crate::detect::DocumentKind;
use crate::error::{Error, Result};
use crate::model::{DataTable, SheetTree};
use crate::request::sheets::{self as build, Dimension, ValueInputOption, ValueRange};
use crate::request::Request;

use super::chart::{ChartOptions, SheetChart};

/// Handle on one sheet of a fetched spreadsheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    config: Arc<Config>,
    spreadsheet_id: String,
    sheet_id: i64,
    title: String,
    charts: Vec<SheetChart>,
}

impl Sheet {
    pub(crate) fn new(config: Arc<Config>, spreadsheet_id: &str, tree: &SheetTree) -> Self {
        Self {
            config,
            spreadsheet_id: spreadsheet_id.to_string(),
            sheet_id: tree.properties.sheet_id,
            title: tree.properties.title.clone(),
            charts: tree
                .charts
                .iter()
                .map(|c| SheetChart::new(spreadsheet_id, c.chart_id))
                .collect(),
        }
    }

    /// Sheet ID.
    pub fn sheet_id(&self) -> i64 {
        self.sheet_id
    }

    /// Tab title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Spreadsheet holding the sheet.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Charts on the sheet, as fetched.
    pub fn charts(&self) -> &[SheetChart] {
        &self.charts
    }

    pub(crate) fn submit(
        &self,
        requests: Vec<Request>,
        operation: &str,
    ) -> Result<serde_json::Value> {
        log::debug!(
            "{}: sending {} instructions to {}",
            operation,
            requests.len(),
            self.spreadsheet_id
        );
        self.config
            .service()
            .batch_update(DocumentKind::Spreadsheet, &self.spreadsheet_id, &requests)
            .map_err(|e| self.config.service_error(e, operation, &self.spreadsheet_id))
    }

    /// Clear every cell value, keeping formatting.
    pub fn clear(&self) -> Result<()> {
        self.submit(vec![build::clear_values(self.sheet_id)], "clear sheet")?;
        Ok(())
    }

    /// Append `table` column by column starting at column A.
    pub fn append(&self, table: &DataTable) -> Result<()> {
        let body = ValueRange {
            major_dimension: Dimension::Columns,
            values: table.to_column_major(),
        };
        let range = format!("{}!A:A", self.title);
        log::debug!(
            "appending {} columns to {} ({})",
            body.values.len(),
            range,
            self.spreadsheet_id
        );
        self.config
            .service()
            .append_values(&self.spreadsheet_id, &range, &body, ValueInputOption::UserEntered)
            .map_err(|e| self.config.service_error(e, "append values", &self.spreadsheet_id))?;
        Ok(())
    }

    /// Read the sheet back; the first row is taken as the header.
    pub fn values(&self) -> Result<DataTable> {
        let rows = self
            .config
            .service()
            .get_values(&self.spreadsheet_id, &self.title)
            .map_err(|e| self.config.service_error(e, "read values", &self.spreadsheet_id))?;
        Ok(DataTable::from_rows(&rows))
    }

    /// Instruction adding a chart, with columns resolved from the header row.
    pub fn chart_request(&self, x: &str, ys: &[&str], options: &ChartOptions) -> Result<Request> {
        let table = self.values()?;
        let index = |name: &str| -> Result<u32> {
            let i = table
                .column_index(name)
                .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
            grid_index(i, "column")
        };
        let x_column = index(x)?;
        let y_columns = ys.iter().map(|&y| index(y)).collect::<Result<Vec<_>>>()?;
        let row_count = grid_index(table.row_count(), "row count")?;
        Ok(options.add_chart_request(self.sheet_id, x_column, &y_columns, row_count))
    }
}

/// Narrow a table position to a grid index, leaving room for the header row.
fn grid_index(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|&v| v < u32::MAX)
        .ok_or_else(|| Error::Precondition(format!("{} {} exceeds the grid limit", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_bounds() {
        assert_eq!(grid_index(0, "row count").unwrap(), 0);
        assert_eq!(grid_index(10, "row count").unwrap(), 10);
        assert!(matches!(
            grid_index(u32::MAX as usize, "row count"),
            Err(Error::Precondition(_))
        ));
        assert!(matches!(grid_index(usize::MAX, "column"), Err(Error::Precondition(_))));
    }
}
