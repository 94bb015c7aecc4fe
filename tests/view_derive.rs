//! View derivation tests: filtering, sorting, column order

mod common;

use common::test_columns;
use datagrid::grid::derive::{filter_rows, sort_rows};
use datagrid::grid::{derive_view, SortKey};
use datagrid::model::{
    Column, PinnedColumns, Row, SearchState, SortDirection, SortState,
};

fn two_rows() -> Vec<Row> {
    vec![
        Row::new().with("id", 1).with("name", "b"),
        Row::new().with("id", 2).with("name", "a"),
    ]
}

fn ids(rows: &[Row], order: &[usize]) -> Vec<String> {
    order.iter().map(|&i| rows[i].get("id").display()).collect()
}

fn fields(columns: &[Column], order: &[usize]) -> Vec<String> {
    order.iter().map(|&i| columns[i].field.clone()).collect()
}

// ========================================================================
// Scenarios
// ========================================================================

#[test]
fn test_sort_by_name_ascending() {
    let rows = two_rows();
    let view = derive_view(
        &rows,
        &SortState::by("name", SortDirection::Ascending),
        &SearchState::default(),
        &PinnedColumns::new(),
        &test_columns(),
    );
    assert_eq!(ids(&rows, &view.rows), vec!["2", "1"]);
}

#[test]
fn test_search_matches_substring_of_any_value() {
    let rows = two_rows();
    let view = derive_view(
        &rows,
        &SortState::default(),
        &SearchState::new("a"),
        &PinnedColumns::new(),
        &test_columns(),
    );
    assert_eq!(ids(&rows, &view.rows), vec!["2"]);
}

#[test]
fn test_pinned_name_moves_to_front() {
    let columns = test_columns();
    let pinned: PinnedColumns = ["name"].into_iter().collect();
    let view = derive_view(
        &[],
        &SortState::default(),
        &SearchState::default(),
        &pinned,
        &columns,
    );
    assert_eq!(fields(&columns, &view.columns), vec!["name", "id", "email"]);
}

// ========================================================================
// Filtering
// ========================================================================

#[test]
fn test_search_is_case_insensitive() {
    let rows = vec![
        Row::new().with("email", "Alice@Example.com"),
        Row::new().with("email", "bob@example.com"),
    ];
    assert_eq!(filter_rows(&rows, &SearchState::new("ALICE")), vec![0]);
}

#[test]
fn test_search_matches_numbers_by_display() {
    let rows = vec![Row::new().with("id", 42), Row::new().with("id", 7)];
    assert_eq!(filter_rows(&rows, &SearchState::new("42")), vec![0]);
}

#[test]
fn test_search_is_idempotent() {
    let rows: Vec<Row> = ["apple", "banana", "cherry", "grape"]
        .iter()
        .map(|n| Row::new().with("name", *n))
        .collect();
    let search = SearchState::new("an");

    let once = filter_rows(&rows, &search);
    let filtered: Vec<Row> = once.iter().map(|&i| rows[i].clone()).collect();
    let twice = filter_rows(&filtered, &search);

    assert_eq!(twice.len(), once.len());
    assert_eq!(
        twice.iter().map(|&i| filtered[i].clone()).collect::<Vec<_>>(),
        filtered
    );
}

#[test]
fn test_empty_search_keeps_everything() {
    let rows = two_rows();
    assert_eq!(filter_rows(&rows, &SearchState::new("")), vec![0, 1]);
}

// ========================================================================
// Sorting
// ========================================================================

#[test]
fn test_numeric_sort_is_not_lexicographic() {
    let rows: Vec<Row> = [10, 9, 100, 1]
        .iter()
        .map(|n| Row::new().with("id", *n))
        .collect();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    sort_rows(&rows, &mut order, &SortState::by("id", SortDirection::Ascending));
    assert_eq!(ids(&rows, &order), vec!["1", "9", "10", "100"]);
}

#[test]
fn test_numeric_strings_compare_as_numbers() {
    let rows: Vec<Row> = ["10", "9.5", "-3"]
        .iter()
        .map(|n| Row::new().with("id", *n))
        .collect();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    sort_rows(&rows, &mut order, &SortState::by("id", SortDirection::Ascending));
    assert_eq!(ids(&rows, &order), vec!["-3", "9.5", "10"]);
}

#[test]
fn test_mixed_column_puts_numbers_first() {
    assert!(SortKey::from_display("5".into()).compare(&SortKey::from_display("abc".into())).is_lt());
    assert!(SortKey::from_display("NaN".into()).compare(&SortKey::from_display("1".into())).is_gt());
}

#[test]
fn test_descending_keeps_tie_order() {
    let rows = vec![
        Row::new().with("id", 1).with("name", "same"),
        Row::new().with("id", 2).with("name", "other"),
        Row::new().with("id", 3).with("name", "same"),
    ];
    let mut order: Vec<usize> = (0..rows.len()).collect();
    sort_rows(
        &rows,
        &mut order,
        &SortState::by("name", SortDirection::Descending),
    );
    assert_eq!(ids(&rows, &order), vec!["1", "3", "2"]);
}

#[test]
fn test_no_direction_preserves_load_order() {
    let rows = two_rows();
    let mut order = vec![0, 1];
    sort_rows(&rows, &mut order, &SortState::default());
    assert_eq!(order, vec![0, 1]);
}

#[test]
fn test_absent_values_sort_as_empty_text() {
    let rows = vec![
        Row::new().with("id", 1).with("name", "b"),
        Row::new().with("id", 2),
        Row::new().with("id", 3).with("name", "a"),
    ];
    let mut order: Vec<usize> = (0..rows.len()).collect();
    sort_rows(&rows, &mut order, &SortState::by("name", SortDirection::Ascending));
    assert_eq!(ids(&rows, &order), vec!["2", "3", "1"]);
}

#[test]
fn test_sort_applies_after_filter() {
    let rows = vec![
        Row::new().with("id", 3).with("name", "carla"),
        Row::new().with("id", 1).with("name", "bob"),
        Row::new().with("id", 2).with("name", "anna"),
    ];
    let view = derive_view(
        &rows,
        &SortState::by("id", SortDirection::Descending),
        &SearchState::new("a"),
        &PinnedColumns::new(),
        &test_columns(),
    );
    assert_eq!(ids(&rows, &view.rows), vec!["3", "2"]);
}

// ========================================================================
// Sort cycle
// ========================================================================

#[test]
fn test_three_activations_cycle_back_to_none() {
    let s1 = SortState::default().cycle("name");
    assert_eq!((s1.key(), s1.direction()), (Some("name"), SortDirection::Ascending));
    let s2 = s1.cycle("name");
    assert_eq!((s2.key(), s2.direction()), (Some("name"), SortDirection::Descending));
    let s3 = s2.cycle("name");
    assert_eq!((s3.key(), s3.direction()), (None, SortDirection::None));
}

#[test]
fn test_other_column_resets_to_ascending() {
    let state = SortState::by("name", SortDirection::Descending).cycle("id");
    assert_eq!(state.key(), Some("id"));
    assert_eq!(state.direction(), SortDirection::Ascending);
}

// ========================================================================
// Column order
// ========================================================================

#[test]
fn test_pin_order_not_column_order() {
    let columns = test_columns();
    let pinned: PinnedColumns = ["email", "id"].into_iter().collect();
    let view = derive_view(
        &[],
        &SortState::default(),
        &SearchState::default(),
        &pinned,
        &columns,
    );
    assert_eq!(fields(&columns, &view.columns), vec!["email", "id", "name"]);
}

#[test]
fn test_pin_then_unpin_restores_order() {
    let columns = test_columns();
    let mut pinned = PinnedColumns::new();
    let original = derive_view(&[], &SortState::default(), &SearchState::default(), &pinned, &columns);

    pinned.pin("email");
    pinned.unpin("email");
    let restored = derive_view(&[], &SortState::default(), &SearchState::default(), &pinned, &columns);

    assert_eq!(original.columns, restored.columns);
}

#[test]
fn test_pins_for_unknown_fields_are_ignored() {
    let columns = test_columns();
    let pinned: PinnedColumns = ["missing", "name"].into_iter().collect();
    let view = derive_view(&[], &SortState::default(), &SearchState::default(), &pinned, &columns);
    assert_eq!(fields(&columns, &view.columns), vec!["name", "id", "email"]);
}
