//! Spreadsheets: pushing tabular data and building charts from it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use oodles::sheets::{ChartOptions, Spreadsheet};
//! use oodles::{Config, DataTable};
//!
//! # fn demo(config: Arc<Config>) -> oodles::Result<()> {
//! let mut book = Spreadsheet::open(config, "1AbCdEfGhIjKlMnOp")?;
//! let table = DataTable::new()
//!     .with_column("month", ["Jan", "Feb", "Mar"])
//!     .with_column("sales", [10, 14, 9]);
//! book.write_table("Sales", &table)?;
//! book.create_chart("Sales", "month", &["sales"], &ChartOptions::default())?;
//! # Ok(())
//! # }
//! ```

mod chart;
mod sheet;

pub use chart::{ChartOptions, SheetChart, CHART_OFFSET_X, CHART_OFFSET_Y};
pub use sheet::Sheet;

use serde_json::Value;
use std::sync::Arc;

use crate::client::Permission;
use crate::config::Config;
use crate::detect::{resolve_document_id, DocumentKind};
use crate::error::{Error, Result};
use crate::files;
use crate::model::{DataTable, SpreadsheetTree};
use crate::request::sheets as build;

/// A fetched spreadsheet.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    config: Arc<Config>,
    tree: SpreadsheetTree,
}

impl Spreadsheet {
    /// Fetch a spreadsheet by ID or URL.
    pub fn open(config: Arc<Config>, reference: &str) -> Result<Self> {
        let id = resolve_document_id(reference, DocumentKind::Spreadsheet)?;
        let tree = Self::fetch(&config, &id)?;
        Ok(Self { config, tree })
    }

    /// Create an empty spreadsheet and fetch it.
    pub fn create(config: Arc<Config>, title: &str) -> Result<Self> {
        let id = files::create(&config, DocumentKind::Spreadsheet, title)?;
        Self::open(config, &id)
    }

    fn fetch(config: &Config, id: &str) -> Result<SpreadsheetTree> {
        let value = config
            .service()
            .fetch(DocumentKind::Spreadsheet, id)
            .map_err(|e| config.service_error(e, "fetch", id))?;
        let mut tree = SpreadsheetTree::from_value(value)?;
        if tree.spreadsheet_id.is_empty() {
            tree.spreadsheet_id = id.to_string();
        }
        log::debug!("fetched spreadsheet {} ({} sheets)", id, tree.sheets.len());
        Ok(tree)
    }

    /// Spreadsheet ID.
    pub fn id(&self) -> &str {
        &self.tree.spreadsheet_id
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.tree.properties.title
    }

    /// Editing URL.
    pub fn url(&self) -> String {
        DocumentKind::Spreadsheet.document_url(self.id())
    }

    /// The fetched tree.
    pub fn tree(&self) -> &SpreadsheetTree {
        &self.tree
    }

    /// Fetch the spreadsheet again.
    pub fn reload(&mut self) -> Result<()> {
        let id = self.id().to_string();
        self.tree = Self::fetch(&self.config, &id)?;
        Ok(())
    }

    /// Give `email` write access, or ownership when `as_admin` is set.
    pub fn share_with(&self, email: &str, as_admin: bool) -> Result<()> {
        let permission = if as_admin {
            Permission::owner(email)
        } else {
            Permission::writer(email)
        };
        files::share(&self.config, self.id(), &permission)
    }

    /// Delete the spreadsheet.
    pub fn delete(self) -> Result<()> {
        files::delete(&self.config, self.id())
    }

    /// All sheets, in tab order.
    pub fn sheets(&self) -> Vec<Sheet> {
        self.tree
            .sheets
            .iter()
            .map(|s| Sheet::new(Arc::clone(&self.config), self.id(), s))
            .collect()
    }

    /// Sheet by tab title.
    pub fn sheet(&self, name: &str) -> Result<Sheet> {
        self.tree
            .sheet(name)
            .map(|s| Sheet::new(Arc::clone(&self.config), self.id(), s))
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Sheet by zero-based tab position.
    pub fn sheet_at(&self, index: usize) -> Result<Sheet> {
        self.tree
            .sheets
            .get(index)
            .map(|s| Sheet::new(Arc::clone(&self.config), self.id(), s))
            .ok_or_else(|| Error::SheetNotFound(format!("#{}", index)))
    }

    /// Replace the content of sheet `name` with `table`.
    ///
    /// A missing sheet is created first, sized for the table but never
    /// smaller than 1000 rows by 26 columns.
    pub fn write_table(&mut self, name: &str, table: &DataTable) -> Result<()> {
        let sheet = match self.sheet(name) {
            Ok(sheet) => sheet,
            Err(Error::SheetNotFound(_)) => {
                let (rows, columns) = table.shape();
                log::info!("creating sheet '{}' in {}", name, self.id());
                self.submit(vec![build::add_sheet(name, rows, columns)], "add sheet")?;
                self.reload()?;
                self.sheet(name)?
            }
            Err(e) => return Err(e),
        };
        sheet.clear()?;
        sheet.append(table)
    }

    /// Read sheet `name` back as a table.
    pub fn values(&self, name: &str) -> Result<DataTable> {
        self.sheet(name)?.values()
    }

    /// Chart `ys` against `x` on sheet `name`, then reload.
    ///
    /// Returns the new chart when the service reports its ID.
    pub fn create_chart(
        &mut self,
        name: &str,
        x: &str,
        ys: &[&str],
        options: &ChartOptions,
    ) -> Result<Option<SheetChart>> {
        let sheet = self.sheet(name)?;
        let request = sheet.chart_request(x, ys, options)?;
        let reply = sheet.submit(vec![request], "add chart")?;
        self.reload()?;

        let created = new_chart_id(&reply)
            .or_else(|| {
                let after = self.sheet(name).ok()?;
                after
                    .charts()
                    .iter()
                    .find(|c| !sheet.charts().contains(c))
                    .map(|c| c.chart_id)
            })
            .map(|chart_id| SheetChart::new(self.id(), chart_id));
        Ok(created)
    }

    /// Delete sheet `name`.
    pub fn delete_sheet(&mut self, name: &str) -> Result<()> {
        let sheet = self.sheet(name)?;
        self.submit(vec![build::delete_sheet(sheet.sheet_id())], "delete sheet")?;
        self.reload()
    }

    fn submit(&self, requests: Vec<crate::request::Request>, operation: &str) -> Result<Value> {
        log::debug!(
            "{}: sending {} instructions to {}",
            operation,
            requests.len(),
            self.id()
        );
        self.config
            .service()
            .batch_update(DocumentKind::Spreadsheet, self.id(), &requests)
            .map_err(|e| self.config.service_error(e, operation, self.id()))
    }
}

fn new_chart_id(reply: &Value) -> Option<i64> {
    reply
        .get("replies")?
        .as_array()?
        .iter()
        .find_map(|r| r.pointer("/addChart/chart/chartId")?.as_i64())
}
