//! Remote data source
//!
//! Wire contract: `GET <endpoint>?rows=<n>&lessRows=<0|1>` answering
//! `{ "data": [ { "field": value, ... }, ... ] }`. Values must be scalars
//! (string, number, boolean or null). Columns and the total row count come from
//! configuration, not from the response.

use std::fmt;

use serde_json::Value;

use crate::grid::PageRequest;
use crate::model::{CellValue, Row};

/// Why a page could not be fetched
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Transport failure or non-success HTTP status
    Network(String),
    /// The body did not match the `{ data: Row[] }` contract
    Shape(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(message) => write!(f, "network error: {}", message),
            FetchError::Shape(message) => write!(f, "unexpected response shape: {}", message),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything that can produce a page of rows
///
/// Called from a worker thread, hence `Send + Sync`.
pub trait DataSource: Send + Sync {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Row>, FetchError>;
}

/// Parse a response body into rows; malformed pages are rejected whole
pub fn parse_page(body: &str) -> Result<Vec<Row>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Shape(format!("invalid JSON: {}", e)))?;

    let data = value
        .get("data")
        .ok_or_else(|| FetchError::Shape("missing `data` field".to_string()))?;
    let items = data
        .as_array()
        .ok_or_else(|| FetchError::Shape("`data` is not an array".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_row(item).map_err(|e| FetchError::Shape(format!("row {}: {}", i, e))))
        .collect()
}

fn parse_row(item: &Value) -> Result<Row, String> {
    let object = item.as_object().ok_or("not an object")?;
    let mut row = Row::new();
    for (field, value) in object {
        let cell = match value {
            Value::Null => CellValue::Absent,
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Bool(b) => CellValue::Text(b.to_string()),
            Value::Number(n) => match n.as_f64() {
                Some(f) => CellValue::Number(f),
                None => CellValue::Text(n.to_string()),
            },
            Value::Array(_) | Value::Object(_) => {
                return Err(format!("field `{}` is not a scalar", field));
            }
        };
        row.insert(field.as_str(), cell);
    }
    Ok(row)
}

/// HTTP source backed by ureq
pub struct HttpDataSource {
    endpoint: String,
    agent: ureq::Agent,
}

impl fmt::Debug for HttpDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDataSource")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl HttpDataSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Query string for a page request
pub fn query_params(request: &PageRequest) -> [(&'static str, String); 2] {
    [
        ("rows", request.rows.to_string()),
        (
            "lessRows",
            if request.less_rows { "1" } else { "0" }.to_string(),
        ),
    ]
}

impl DataSource for HttpDataSource {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Row>, FetchError> {
        let mut call = self.agent.get(&self.endpoint);
        for (key, value) in query_params(request) {
            call = call.query(key, value);
        }

        let response = call
            .call()
            .map_err(|e| FetchError::Network(format!("GET {}: {}", self.endpoint, e)))?;
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| FetchError::Network(format!("reading body: {}", e)))?;

        parse_page(&body)
    }
}
