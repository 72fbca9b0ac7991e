//! Columnar tabular data pushed to and read from sheets.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text format of timestamp cells on the wire.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// No value
    #[default]
    Empty,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
    /// Date and time (no zone)
    Timestamp(NaiveDateTime),
}

impl CellValue {
    /// Wire representation used when appending values.
    pub fn to_wire(&self) -> Value {
        match self {
            CellValue::Empty => Value::String(String::new()),
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Int(i) => Value::from(*i),
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(f.to_string())),
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Timestamp(ts) => Value::String(ts.format(TIMESTAMP_FORMAT).to_string()),
        }
    }

    /// Interpret a value read back from a sheet.
    pub fn from_wire(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) if s.is_empty() => CellValue::Empty,
            Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }

    /// Text shown for this cell.
    pub fn as_text(&self) -> String {
        match self.to_wire() {
            Value::String(s) => s,
            other => other.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Timestamp(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// A named column of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Header
    pub name: String,

    /// Cells below the header
    pub values: Vec<CellValue>,
}

impl Column {
    /// Create a column from anything convertible to cells.
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Header followed by the wire values, as one column-major entry.
    pub fn to_wire(&self) -> Vec<Value> {
        std::iter::once(Value::String(self.name.clone()))
            .chain(self.values.iter().map(CellValue::to_wire))
            .collect()
    }
}

/// An ordered set of named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    /// Columns, left to right
    pub columns: Vec<Column>,
}

impl DataTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column (builder style).
    pub fn with_column<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.columns.push(Column::new(name, values));
        self
    }

    /// Append a column.
    pub fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// `(rows, columns)`, rows counted without the header.
    pub fn shape(&self) -> (usize, usize) {
        let rows = self
            .columns
            .iter()
            .map(|c| c.values.len())
            .max()
            .unwrap_or(0);
        (rows, self.columns.len())
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.shape().0
    }

    /// Column headers.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Zero-based index of a column by header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column by header.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column-major wire values, one entry per column.
    pub fn to_column_major(&self) -> Vec<Vec<Value>> {
        self.columns.iter().map(Column::to_wire).collect()
    }

    /// Build a table from row-major values whose first row is the header.
    pub fn from_rows(rows: &[Vec<Value>]) -> Self {
        let Some((header, body)) = rows.split_first() else {
            return Self::default();
        };
        let columns = header
            .iter()
            .enumerate()
            .map(|(i, name)| Column {
                name: CellValue::from_wire(name).as_text(),
                values: body
                    .iter()
                    .map(|row| row.get(i).map(CellValue::from_wire).unwrap_or_default())
                    .collect(),
            })
            .collect();
        Self { columns }
    }
}
