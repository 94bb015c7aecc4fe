//! Presented view derivation
//!
//! Pure function from (rows, sort, search, pins, columns) to the ordered row
//! and column indices the renderer should show. Nothing is cached between calls.

use std::cmp::Ordering;

use crate::model::{Column, PinnedColumns, Row, SearchState, SortDirection, SortState};

/// Ordered indices into the loaded rows and the configured columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedView {
    pub rows: Vec<usize>,
    pub columns: Vec<usize>,
}

impl DerivedView {
    /// Index (into the loaded rows) of the last presented row
    pub fn last_row(&self) -> Option<usize> {
        self.rows.last().copied()
    }
}

pub fn derive_view(
    rows: &[Row],
    sort: &SortState,
    search: &SearchState,
    pinned: &PinnedColumns,
    columns: &[Column],
) -> DerivedView {
    let mut indices = filter_rows(rows, search);
    sort_rows(rows, &mut indices, sort);
    DerivedView {
        rows: indices,
        columns: order_columns(columns, pinned),
    }
}

/// Indices of rows where any value contains the term, case-insensitively
pub fn filter_rows(rows: &[Row], search: &SearchState) -> Vec<usize> {
    if !search.is_active() {
        return (0..rows.len()).collect();
    }

    let needle = search.term().to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// `needle` must already be lowercase
pub fn row_matches(row: &Row, needle: &str) -> bool {
    row.values()
        .any(|value| value.display().to_lowercase().contains(needle))
}

/// Comparable form of a cell for sorting
///
/// Numbers order before text so the comparator stays a total order on mixed
/// columns; within each class the order is numeric or lexicographic.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    pub fn from_display(text: String) -> Self {
        match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => SortKey::Number(n),
            _ => SortKey::Text(text),
        }
    }

    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Stable sort of `indices` by the active sort column
///
/// Descending uses a reversed comparator, so rows with equal keys keep their
/// load order in both directions.
pub fn sort_rows(rows: &[Row], indices: &mut Vec<usize>, sort: &SortState) {
    let Some(field) = sort.key() else {
        return;
    };
    let direction = sort.direction();
    if direction == SortDirection::None {
        return;
    }

    let mut keyed: Vec<(SortKey, usize)> = indices
        .iter()
        .map(|&i| (SortKey::from_display(rows[i].get(field).display()), i))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Descending => b.compare(a),
        _ => a.compare(b),
    });

    *indices = keyed.into_iter().map(|(_, i)| i).collect();
}

/// Pinned columns first (in pin order), the rest in configured order
pub fn order_columns(columns: &[Column], pinned: &PinnedColumns) -> Vec<usize> {
    let mut pinned_cols: Vec<(usize, usize)> = Vec::with_capacity(pinned.len());
    let mut rest: Vec<usize> = Vec::with_capacity(columns.len());

    for (i, col) in columns.iter().enumerate() {
        match pinned.position(&col.field) {
            Some(pos) => pinned_cols.push((pos, i)),
            None => rest.push(i),
        }
    }

    pinned_cols.sort_by_key(|&(pos, _)| pos);
    pinned_cols
        .into_iter()
        .map(|(_, i)| i)
        .chain(rest)
        .collect()
}
