//! Row and column data types
//!
//! Rows arrive page by page from the remote source and are never mutated
//! once loaded. Columns come from configuration and stay structurally stable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar cell value
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// Missing field or JSON `null`
    #[default]
    Absent,
}

impl CellValue {
    /// Display string used for measuring, searching and sorting.
    ///
    /// Integral numbers render without a fractional part (`42`, not `42.0`).
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Absent => String::new(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Absent => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// One row of grid data: field name → value
///
/// Rows have no natural key; their identity is their position in [`LoadedRows`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(field.into(), value.into());
    }

    /// Value at `field`, `Absent` when the row doesn't carry it
    pub fn get(&self, field: &str) -> &CellValue {
        static ABSENT: CellValue = CellValue::Absent;
        self.cells.get(field).unwrap_or(&ABSENT)
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.values()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Semantic column type, used by renderers for alignment and formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
    Email,
}

/// A configured grid column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Unique key into each [`Row`]
    pub field: String,
    /// Header text; empty means "derive from field"
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(field: impl Into<String>, label: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            kind,
        }
    }

    /// Column whose label is the upper-cased field name
    pub fn from_field(field: &str) -> Self {
        Self::new(field, field.to_uppercase(), ColumnKind::Text)
    }

    /// Header label, falling back to the upper-cased field name
    pub fn header(&self) -> String {
        if self.label.is_empty() {
            self.field.to_uppercase()
        } else {
            self.label.clone()
        }
    }
}

/// All rows fetched so far, in page-arrival order
///
/// Append-only: existing rows are never reordered or removed, except by [`LoadedRows::clear`]
/// when the grid is reset.
#[derive(Debug, Clone, Default)]
pub struct LoadedRows {
    rows: Vec<Row>,
    pages: usize,
}

impl LoadedRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page, returning the new row count
    pub fn append_page(&mut self, page: Vec<Row>) -> usize {
        self.rows.extend(page);
        self.pages += 1;
        self.rows.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of pages merged since the last reset
    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn as_slice(&self) -> &[Row] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.pages = 0;
    }
}
