//! Dark/light grid themes
//!
//! Both built-in themes are YAML files embedded at compile time. A user file at
//! `~/.config/datagrid/themes/{dark,light}.yaml` takes precedence over the
//! embedded one for that mode.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DARK_YAML: &str = include_str!("../themes/dark.yaml");
pub const LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// Which of the two themes is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    fn builtin_yaml(self) -> &'static str {
        match self {
            ThemeMode::Dark => DARK_YAML,
            ThemeMode::Light => LIGHT_YAML,
        }
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(format!("Unknown theme: {} (expected dark or light)", other)),
        }
    }
}

/// RGB color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from "#RRGGBB"
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if s.len() != 6 || !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        Ok(Color {
            r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
            g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
            b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// 24-bit ANSI foreground escape
    pub fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// 24-bit ANSI background escape
    pub fn ansi_bg(self) -> String {
        format!("\x1b[48;2;{};{};{}m", self.r, self.g, self.b)
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    pub mode: ThemeMode,
    pub grid: GridThemeData,
}

/// Grid colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct GridThemeData {
    pub background: String,
    pub foreground: String,
    pub header_background: String,
    pub header_foreground: String,
    pub row_alt_background: String,
    pub pinned_background: String,
    #[serde(default)]
    pub border: Option<String>,
    #[serde(default)]
    pub muted_foreground: Option<String>,
}

/// Resolved theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub mode: ThemeMode,
    pub background: Color,
    pub foreground: Color,
    pub header_background: Color,
    pub header_foreground: Color,
    pub row_alt_background: Color,
    pub pinned_background: Color,
    pub border: Color,
    pub muted_foreground: Color,
}

impl Theme {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
    }

    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let foreground = Color::from_hex(&data.grid.foreground)?;
        let background = Color::from_hex(&data.grid.background)?;
        Ok(Theme {
            name: data.name,
            mode: data.mode,
            background,
            foreground,
            header_background: Color::from_hex(&data.grid.header_background)?,
            header_foreground: Color::from_hex(&data.grid.header_foreground)?,
            row_alt_background: Color::from_hex(&data.grid.row_alt_background)?,
            pinned_background: Color::from_hex(&data.grid.pinned_background)?,
            border: data
                .grid
                .border
                .as_ref()
                .map(|s| Color::from_hex(s))
                .transpose()?
                .unwrap_or(foreground),
            muted_foreground: data
                .grid
                .muted_foreground
                .as_ref()
                .map(|s| Color::from_hex(s))
                .transpose()?
                .unwrap_or(foreground),
        })
    }

    /// Embedded theme for `mode`
    pub fn builtin(mode: ThemeMode) -> Self {
        match Theme::from_yaml(mode.builtin_yaml()) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::error!("Built-in {} theme failed to parse: {}", mode.id(), e);
                Theme::fallback(mode)
            }
        }
    }

    /// Theme for `mode`, preferring a user override in the config directory
    pub fn load(mode: ThemeMode) -> Self {
        if let Some(path) = crate::config_paths::theme_file(mode.id()) {
            if path.exists() {
                match Theme::from_file(&path) {
                    Ok(theme) if theme.mode == mode => {
                        tracing::info!("Loaded user theme from {}", path.display());
                        return theme;
                    }
                    Ok(_) => {
                        tracing::warn!("Theme {} declares the wrong mode, ignoring", path.display())
                    }
                    Err(e) => tracing::warn!("{}", e),
                }
            }
        }
        Theme::builtin(mode)
    }

    fn fallback(mode: ThemeMode) -> Self {
        let (bg, fg) = match mode {
            ThemeMode::Dark => (Color::rgb(0x1E, 0x1E, 0x1E), Color::rgb(0xD4, 0xD4, 0xD4)),
            ThemeMode::Light => (Color::rgb(0xFF, 0xFF, 0xFF), Color::rgb(0x24, 0x29, 0x2F)),
        };
        Theme {
            name: format!("Fallback {}", mode.id()),
            mode,
            background: bg,
            foreground: fg,
            header_background: bg,
            header_foreground: fg,
            row_alt_background: bg,
            pinned_background: bg,
            border: fg,
            muted_foreground: fg,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin(ThemeMode::Dark)
    }
}
