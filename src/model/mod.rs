//! Grid model - the complete state of the grid
//!
//! This module contains all the state types following the Elm Architecture pattern.
//! `GridModel` owns every piece of mutable state; column widths and the presented
//! view are derived from it in [`GridModel::refresh_derived`] and cannot be
//! modified on their own.

pub mod data;
pub mod view_state;

pub use data::{CellValue, Column, ColumnKind, LoadedRows, Row};
pub use view_state::{PinnedColumns, SearchState, SortDirection, SortState};

use crate::commands::Cmd;
use crate::config::GridConfig;
use crate::grid::{
    compute_widths, derive_view, ColumnWidths, DerivedView, PageLoader, RenderColumn, RenderModel,
    SentinelTarget, TextMeasurer, WidthSettings,
};
use crate::source::FetchError;
use crate::theme::Theme;

/// Values computed from the model, never edited directly
#[derive(Debug, Default)]
struct Derived {
    widths: ColumnWidths,
    /// Row count the widths were computed for; `None` forces a fresh computation
    widths_row_count: Option<usize>,
    view: DerivedView,
}

/// The complete grid model
#[derive(Debug)]
pub struct GridModel {
    config: GridConfig,
    columns: Vec<Column>,
    rows: LoadedRows,
    pub(crate) sort: SortState,
    pub(crate) search: SearchState,
    pub(crate) pinned: PinnedColumns,
    pub(crate) theme: Theme,
    pub(crate) loader: PageLoader,
    pub(crate) last_error: Option<FetchError>,
    measurer: Box<dyn TextMeasurer>,
    width_settings: WidthSettings,
    derived: Derived,
    /// Row the sentinel is registered on
    sentinel: Option<SentinelTarget>,
}

impl GridModel {
    pub fn new(config: GridConfig, measurer: Box<dyn TextMeasurer>) -> Self {
        let loader = PageLoader::new(config.page_size, config.total_rows, config.less_rows);
        let mut model = Self {
            columns: config.columns.clone(),
            rows: LoadedRows::new(),
            sort: SortState::default(),
            search: SearchState::default(),
            pinned: PinnedColumns::new(),
            theme: Theme::load(config.theme),
            loader,
            last_error: None,
            measurer,
            width_settings: config.width_settings(),
            derived: Derived::default(),
            sentinel: None,
            config,
        };
        model.refresh_derived();
        model
    }

    /// Commands to run at startup: fetch the first page
    pub fn init(&mut self) -> Option<Cmd> {
        let fetch = self.loader.request_next_page(self.rows.len()).map(Cmd::FetchPage);
        let effects = self.refresh_derived();
        Cmd::merge(Cmd::merge(Some(Cmd::Redraw), fetch), effects)
    }

    // === State accessors ===

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, field: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub fn rows(&self) -> &[Row] {
        self.rows.as_slice()
    }

    pub fn loaded_count(&self) -> usize {
        self.rows.len()
    }

    pub fn page_count(&self) -> usize {
        self.rows.page_count()
    }

    pub fn total_rows(&self) -> usize {
        self.loader.total_rows()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// More rows exist on the server
    pub fn has_more(&self) -> bool {
        self.loader.has_more(self.rows.len())
    }

    pub fn can_load(&self) -> bool {
        self.loader.can_load(self.rows.len())
    }

    pub fn loader(&self) -> &PageLoader {
        &self.loader
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn pinned(&self) -> &PinnedColumns {
        &self.pinned
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    // === Derived values ===

    pub fn column_widths(&self) -> &ColumnWidths {
        &self.derived.widths
    }

    pub fn column_width(&self, field: &str) -> Option<f32> {
        self.derived.widths.get(field).copied()
    }

    pub fn view(&self) -> &DerivedView {
        &self.derived.view
    }

    pub fn sentinel(&self) -> Option<SentinelTarget> {
        self.sentinel
    }

    /// Presented rows in order
    pub fn presented_rows(&self) -> impl Iterator<Item = &Row> {
        self.derived
            .view
            .rows
            .iter()
            .filter_map(|&i| self.rows.get(i))
    }

    /// Presented columns in order
    pub fn presented_columns(&self) -> impl Iterator<Item = &Column> {
        self.derived
            .view
            .columns
            .iter()
            .filter_map(|&i| self.columns.get(i))
    }

    // === Mutations used by update ===

    /// Append an accepted page, trimmed to what was asked for and to the row ceiling
    pub(crate) fn append_page(&mut self, mut page: Vec<Row>, requested: usize) -> usize {
        let room = requested.min(self.loader.remaining(self.rows.len()));
        if page.len() > room {
            tracing::warn!(
                "Server returned {} rows, expected at most {}; truncating",
                page.len(),
                room
            );
            page.truncate(room);
        }
        let appended = page.len();
        self.rows.append_page(page);
        appended
    }

    /// Drop all rows and widths; sort, search and pins survive
    pub(crate) fn clear_rows(&mut self) {
        self.rows.clear();
        self.derived.widths.clear();
        self.derived.widths_row_count = None;
        self.last_error = None;
    }

    /// Swap the text measurer; widths are recomputed from scratch
    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
        self.derived.widths_row_count = None;
        self.refresh_derived();
    }

    /// Recompute derived state from the current snapshot
    ///
    /// 1. Column widths, when the row count changed. On append-only growth each
    ///    width is the max of the old and new values, so columns never shrink.
    /// 2. The presented view, always.
    /// 3. The sentinel registration, when the last presented row changed.
    pub fn refresh_derived(&mut self) -> Option<Cmd> {
        let row_count = self.rows.len();
        if self.derived.widths_row_count != Some(row_count) {
            let fresh = compute_widths(
                &self.columns,
                self.rows.as_slice(),
                self.measurer.as_ref(),
                &self.width_settings,
            );
            if self.derived.widths_row_count.is_some() {
                for (field, width) in fresh {
                    let entry = self.derived.widths.entry(field).or_insert(width);
                    *entry = (*entry).max(width);
                }
            } else {
                self.derived.widths = fresh;
            }
            self.derived.widths_row_count = Some(row_count);
            tracing::trace!("Recomputed column widths for {} rows", row_count);
        }

        self.derived.view = derive_view(
            self.rows.as_slice(),
            &self.sort,
            &self.search,
            &self.pinned,
            &self.columns,
        );

        let target = self
            .derived
            .view
            .last_row()
            .map(|row_index| SentinelTarget {
                position: self.derived.view.rows.len() - 1,
                row_index,
            });
        if target != self.sentinel {
            self.sentinel = target;
            Some(Cmd::WatchSentinel(target))
        } else {
            None
        }
    }

    /// Snapshot for the rendering layer
    pub fn render_model(&self) -> RenderModel<'_> {
        let columns = self
            .derived
            .view
            .columns
            .iter()
            .filter_map(|&i| self.columns.get(i))
            .map(|column| RenderColumn {
                column,
                width: self
                    .column_width(&column.field)
                    .unwrap_or(self.width_settings.default_width_px),
                pinned: self.pinned.is_pinned(&column.field),
                sort: if self.sort.key() == Some(column.field.as_str()) {
                    self.sort.direction()
                } else {
                    SortDirection::None
                },
            })
            .collect();

        RenderModel {
            columns,
            rows: self.presented_rows().collect(),
            column_widths: &self.derived.widths,
            loading: self.is_loading(),
            total_rows: self.total_rows(),
            loaded_count: self.loaded_count(),
            sort: &self.sort,
            search: self.search.term(),
            pinned: &self.pinned,
            theme: self.theme.mode,
            error: self.last_error.as_ref().map(|e| e.to_string()),
        }
    }
}
