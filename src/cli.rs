//! Command-line argument parsing for the grid
//!
//! Supports:
//! - Overriding the endpoint and paging parameters from the config file
//! - Applying an initial sort, search and pins before printing
//! - Table, JSON and CSV output

use clap::Parser;
use std::path::PathBuf;

use crate::config::GridConfig;
use crate::model::SortDirection;
use crate::theme::ThemeMode;

/// Headless infinite-scroll data grid
#[derive(Parser, Debug)]
#[command(
    name = "datagrid",
    version,
    about = "Fetch, sort, search and pin a paged remote dataset"
)]
pub struct CliArgs {
    /// Data endpoint (overrides the config file)
    #[arg(value_name = "ENDPOINT")]
    pub endpoint: Option<String>,

    /// Config file to use instead of ~/.config/datagrid/config.yaml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of pages to load before printing
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub pages: usize,

    /// Rows per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Known row count on the server
    #[arg(long, value_name = "N")]
    pub total_rows: Option<usize>,

    /// Sort by this field (ascending unless --desc)
    #[arg(short, long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort descending (used with --sort)
    #[arg(long)]
    pub desc: bool,

    /// Only show rows containing this text
    #[arg(short = 'q', long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Pin a column to the left (repeatable, applied in order)
    #[arg(long = "pin", value_name = "FIELD")]
    pub pins: Vec<String>,

    /// Color theme
    #[arg(long, value_name = "dark|light")]
    pub theme: Option<ThemeMode>,

    /// Print the render model as JSON instead of a table
    #[arg(long, conflicts_with = "export")]
    pub json: bool,

    /// Write the presented view to a CSV file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Rows visible in the simulated viewport
    #[arg(long, value_name = "N", default_value_t = 40)]
    pub window: usize,
}

/// What to do with the grid once loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
    Csv(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Grid configuration after CLI overrides
    pub grid: GridConfig,
    /// Pages to load before output
    pub pages: usize,
    /// Initial sort, applied through header activations
    pub sort: Option<(String, SortDirection)>,
    pub search: Option<String>,
    pub pins: Vec<String>,
    pub output: OutputMode,
    pub window_rows: usize,
}

impl CliArgs {
    /// Merge parsed CLI args over `base` into startup configuration
    pub fn into_config(self, base: GridConfig) -> Result<StartupConfig, String> {
        let mut grid = base;
        if let Some(endpoint) = self.endpoint {
            grid.endpoint = endpoint;
        }
        if let Some(page_size) = self.page_size {
            if page_size == 0 {
                return Err("--page-size must be at least 1".to_string());
            }
            grid.page_size = page_size;
        }
        if let Some(total_rows) = self.total_rows {
            grid.total_rows = total_rows;
        }
        if let Some(theme) = self.theme {
            grid.theme = theme;
        }

        let sort = match self.sort {
            Some(field) => {
                if !grid.columns.iter().any(|c| c.field == field) {
                    return Err(format!("Unknown sort column: {}", field));
                }
                let direction = if self.desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                Some((field, direction))
            }
            None if self.desc => return Err("--desc requires --sort".to_string()),
            None => None,
        };

        if let Some(unknown) = self
            .pins
            .iter()
            .find(|p| !grid.columns.iter().any(|c| &c.field == *p))
        {
            return Err(format!("Unknown pin column: {}", unknown));
        }

        let output = match (self.json, self.export) {
            (_, Some(path)) => OutputMode::Csv(path),
            (true, None) => OutputMode::Json,
            (false, None) => OutputMode::Table,
        };

        Ok(StartupConfig {
            grid,
            pages: self.pages.max(1),
            sort,
            search: self.search.filter(|s| !s.is_empty()),
            pins: self.pins,
            output,
            window_rows: self.window.max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        let mut full = vec!["datagrid"];
        full.extend_from_slice(argv);
        CliArgs::parse_from(full)
    }

    #[test]
    fn test_defaults() {
        let config = args(&[]).into_config(GridConfig::default()).unwrap();
        assert_eq!(config.pages, 1);
        assert_eq!(config.output, OutputMode::Table);
        assert_eq!(config.sort, None);
        assert_eq!(config.grid, GridConfig::default());
    }

    #[test]
    fn test_overrides_apply() {
        let config = args(&[
            "http://localhost:3000/data",
            "--page-size",
            "25",
            "--total-rows",
            "60",
            "--theme",
            "light",
        ])
        .into_config(GridConfig::default())
        .unwrap();
        assert_eq!(config.grid.endpoint, "http://localhost:3000/data");
        assert_eq!(config.grid.page_size, 25);
        assert_eq!(config.grid.total_rows, 60);
        assert_eq!(config.grid.theme, ThemeMode::Light);
    }

    #[test]
    fn test_sort_direction() {
        let config = args(&["--sort", "email", "--desc"])
            .into_config(GridConfig::default())
            .unwrap();
        assert_eq!(
            config.sort,
            Some(("email".to_string(), SortDirection::Descending))
        );
    }

    #[test]
    fn test_desc_without_sort_is_error() {
        assert!(args(&["--desc"]).into_config(GridConfig::default()).is_err());
    }

    #[test]
    fn test_unknown_columns_rejected() {
        assert!(args(&["--sort", "nope"])
            .into_config(GridConfig::default())
            .is_err());
        assert!(args(&["--pin", "email", "--pin", "nope"])
            .into_config(GridConfig::default())
            .is_err());
    }

    #[test]
    fn test_pins_keep_order() {
        let config = args(&["--pin", "email", "--pin", "firstName"])
            .into_config(GridConfig::default())
            .unwrap();
        assert_eq!(config.pins, vec!["email", "firstName"]);
    }

    #[test]
    fn test_export_wins_output_mode() {
        let config = args(&["--export", "out.csv"])
            .into_config(GridConfig::default())
            .unwrap();
        assert_eq!(config.output, OutputMode::Csv(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(args(&["--page-size", "0"])
            .into_config(GridConfig::default())
            .is_err());
    }
}
