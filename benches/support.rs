//! Shared helpers for benchmarks

use datagrid::model::{Column, ColumnKind, Row};

/// Synthetic rows shaped like the demo dataset
#[allow(dead_code)]
pub fn make_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            Row::new()
                .with("id", i as i64)
                .with("firstName", format!("First{}", i % 977))
                .with("email", format!("user{}@example{}.com", i, i % 13))
                .with("salary", ((i * 7919) % 150_000) as f64 + 0.5)
                .with("company", format!("Company {}", i % 211))
        })
        .collect()
}

#[allow(dead_code)]
pub fn make_columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID", ColumnKind::Number),
        Column::from_field("firstName"),
        Column::new("email", "EMAIL", ColumnKind::Email),
        Column::new("salary", "SALARY", ColumnKind::Number),
        Column::from_field("company"),
    ]
}
