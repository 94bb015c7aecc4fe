//! Grid configuration
//!
//! Read from `~/.config/datagrid/config.yaml`. Every key is optional; missing
//! keys take the defaults below. Nothing is ever written back.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::grid::WidthSettings;
use crate::model::Column;
use crate::theme::ThemeMode;

/// Fields of the demo dataset, in display order
pub const DEFAULT_FIELDS: &[&str] = &[
    "firstName",
    "lastname",
    "number",
    "email",
    "birthdate",
    "address",
    "sex",
    "gender",
    "jobTitle",
    "department",
    "company",
    "subscriptionTier",
    "ipv4",
    "ipv6",
    "mac",
    "creditCard",
    "salary",
    "manufacturer",
    "model",
    "vin",
];

pub const DEFAULT_ENDPOINT: &str = "https://datagrid-backend.glitch.me/data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Remote data endpoint
    pub endpoint: String,
    /// Rows asked for per page
    pub page_size: usize,
    /// Known row ceiling on the server
    pub total_rows: usize,
    /// Send `lessRows=1`
    pub less_rows: bool,
    pub font_size_px: f32,
    /// Room for sort/pin icons and cell padding
    pub padding_px: f32,
    /// Width used when text measurement fails
    pub default_width_px: f32,
    /// TTF/OTF used for measuring; monospace estimate when unset
    pub font_path: Option<PathBuf>,
    pub theme: ThemeMode,
    pub columns: Vec<Column>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: 100,
            total_rows: 10_000,
            less_rows: false,
            font_size_px: 14.0,
            padding_px: 62.0,
            default_width_px: 150.0,
            font_path: None,
            theme: ThemeMode::Dark,
            columns: default_columns(),
        }
    }
}

pub fn default_columns() -> Vec<Column> {
    DEFAULT_FIELDS.iter().map(|f| Column::from_field(f)).collect()
}

impl GridConfig {
    /// Load config from the user config directory, or defaults if absent or invalid
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load an explicitly named config file; errors are the caller's to report
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: GridConfig = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Reject configurations the grid cannot run with
    pub fn validated(mut self) -> anyhow::Result<Self> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        if self.columns.is_empty() {
            self.columns = default_columns();
        }

        let mut seen = std::collections::HashSet::new();
        for col in &self.columns {
            if !seen.insert(col.field.as_str()) {
                anyhow::bail!("duplicate column field `{}`", col.field);
            }
        }
        Ok(self)
    }

    pub fn width_settings(&self) -> WidthSettings {
        WidthSettings {
            font_size_px: self.font_size_px,
            padding_px: self.padding_px,
            default_width_px: self.default_width_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_dataset() {
        let config = GridConfig::default();
        assert_eq!(config.total_rows, 10_000);
        assert_eq!(config.columns.len(), 20);
        assert_eq!(config.columns[0].label, "FIRSTNAME");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = GridConfig::from_yaml("page_size: 25\ntheme: light\n").unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.total_rows, 10_000);
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let yaml = "columns:\n  - field: id\n  - field: id\n";
        assert!(GridConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(GridConfig::from_yaml("page_size: 0").is_err());
    }
}
