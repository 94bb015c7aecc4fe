//! Logging infrastructure
//!
//! Structured logging with scoped filtering for diagnosing paging and
//! view-derivation issues.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=datagrid::grid::loader=debug` - page requests and stale responses
//! - `RUST_LOG=datagrid::update=trace` - every message through `update`
//!
//! # Log Files
//!
//! Logs are written to `~/.config/datagrid/logs/datagrid.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so table/JSON output on stdout stays clean.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(
                logs_dir,
                crate::config_paths::log_file_prefix(),
            );
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// One-line summary of the load state, for transition logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSnapshot {
    pub loaded: usize,
    pub total: usize,
    pub presented: usize,
    pub loading: bool,
}

impl LoadSnapshot {
    pub fn from_model(model: &crate::model::GridModel) -> Self {
        Self {
            loaded: model.loaded_count(),
            total: model.total_rows(),
            presented: model.view().rows.len(),
            loading: model.is_loading(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &LoadSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.loaded != other.loaded {
            changes.push(format!("loaded: {} → {}", self.loaded, other.loaded));
        }
        if self.presented != other.presented {
            changes.push(format!("presented: {} → {}", self.presented, other.presented));
        }
        if self.loading != other.loading {
            changes.push(format!("loading: {} → {}", self.loading, other.loading));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
