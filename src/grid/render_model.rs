//! Snapshot handed to the rendering layer

use serde::Serialize;

use super::width::ColumnWidths;
use crate::model::{Column, PinnedColumns, Row, SortDirection, SortState};
use crate::theme::ThemeMode;

/// A presented column with everything a header cell needs
#[derive(Debug, Clone, Serialize)]
pub struct RenderColumn<'a> {
    #[serde(flatten)]
    pub column: &'a Column,
    pub width: f32,
    pub pinned: bool,
    pub sort: SortDirection,
}

/// Borrowed view of the grid, valid until the next update
#[derive(Debug, Clone, Serialize)]
pub struct RenderModel<'a> {
    /// Presented column order (pinned first)
    pub columns: Vec<RenderColumn<'a>>,
    /// Presented rows (filtered and sorted)
    pub rows: Vec<&'a Row>,
    pub column_widths: &'a ColumnWidths,
    pub loading: bool,
    pub total_rows: usize,
    pub loaded_count: usize,
    pub sort: &'a SortState,
    pub search: &'a str,
    pub pinned: &'a PinnedColumns,
    pub theme: ThemeMode,
    /// Last fetch failure, cleared by the next successful page
    pub error: Option<String>,
}

impl RenderModel<'_> {
    /// Rows loaded but hidden by the search filter
    pub fn hidden_rows(&self) -> usize {
        self.loaded_count.saturating_sub(self.rows.len())
    }

    /// Status line in the style of a grid footer
    pub fn status_line(&self) -> String {
        let mut status = format!("{} of {} rows loaded", self.loaded_count, self.total_rows);
        if !self.search.is_empty() {
            status.push_str(&format!(
                ", {} matching \"{}\"",
                self.rows.len(),
                self.search
            ));
        }
        if self.loading {
            status.push_str(", loading…");
        }
        if let Some(error) = &self.error {
            status.push_str(&format!(", last fetch failed: {}", error));
        }
        status
    }
}
