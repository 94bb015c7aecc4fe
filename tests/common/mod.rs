//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use datagrid::commands::Cmd;
use datagrid::config::GridConfig;
use datagrid::grid::{MonospaceMeasurer, PageRequest, PageResponse};
use datagrid::messages::{DataMsg, Msg};
use datagrid::model::{Column, ColumnKind, GridModel, Row};
use datagrid::source::{DataSource, FetchError};
use datagrid::update::update;

/// `id`, `name`, `email`
pub fn test_columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID", ColumnKind::Number),
        Column::new("name", "NAME", ColumnKind::Text),
        Column::new("email", "EMAIL", ColumnKind::Email),
    ]
}

pub fn test_config(page_size: usize, total_rows: usize) -> GridConfig {
    GridConfig {
        endpoint: "http://localhost/data".to_string(),
        page_size,
        total_rows,
        columns: test_columns(),
        ..GridConfig::default()
    }
}

/// Model with a 1em-per-char measurer, so widths are `chars * 14 + 62`
pub fn test_model(page_size: usize, total_rows: usize) -> GridModel {
    GridModel::new(
        test_config(page_size, total_rows),
        Box::new(MonospaceMeasurer::new(1.0)),
    )
}

pub fn row(id: i64, name: &str, email: &str) -> Row {
    Row::new()
        .with("id", id)
        .with("name", name)
        .with("email", email)
}

/// `n` rows with ids starting at `start`
pub fn rows(start: i64, n: usize) -> Vec<Row> {
    (0..n as i64)
        .map(|i| {
            let id = start + i;
            row(id, &format!("user{}", id), &format!("user{}@example.com", id))
        })
        .collect()
}

/// The single page request inside `cmd`
pub fn fetch_in(cmd: &Option<Cmd>) -> PageRequest {
    let fetches = cmd.as_ref().map(|c| c.fetches()).unwrap_or_default();
    assert_eq!(fetches.len(), 1, "expected exactly one fetch in {:?}", cmd);
    fetches[0].clone()
}

/// Feed a response for `request` back into the model
pub fn deliver(
    model: &mut GridModel,
    request: &PageRequest,
    result: Result<Vec<Row>, FetchError>,
) -> Option<Cmd> {
    let response = PageResponse::for_request(request, result);
    update(model, Msg::Data(DataMsg::PageLoaded(response)))
}

/// Start the model and answer page requests until `pages` have been loaded
pub fn load_pages(model: &mut GridModel, pages: usize) {
    let mut cmd = model.init();
    for i in 0..pages {
        let request = fetch_in(&cmd);
        let page = rows(request.offset as i64, request.rows);
        deliver(model, &request, Ok(page));
        if i + 1 == pages || !model.has_more() {
            break;
        }
        cmd = update(model, Msg::Data(DataMsg::RequestNextPage));
    }
}

/// Scripted data source: pops one response per call, records every request
#[derive(Debug, Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Row>, FetchError>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Vec<Row>, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl DataSource for ScriptedSource {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Row>, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(rows(request.offset as i64, request.rows)))
    }
}
