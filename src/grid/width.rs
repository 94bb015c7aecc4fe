//! Column auto-sizing
//!
//! A column is as wide as the wider of its header label and its longest value
//! (longest by character count, then measured), plus room for the sort and pin
//! affordances.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};

use crate::model::{Column, Row};

/// Pixel width per column field
pub type ColumnWidths = BTreeMap<String, f32>;

/// Error from a [`TextMeasurer`]
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// The font file could not be read or parsed
    FontUnavailable { path: PathBuf, message: String },
    /// The measurer produced no usable width for the text
    Failed(String),
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureError::FontUnavailable { path, message } => {
                write!(f, "font {} unavailable: {}", path.display(), message)
            }
            MeasureError::Failed(message) => write!(f, "text measurement failed: {}", message),
        }
    }
}

impl std::error::Error for MeasureError {}

/// Rendered width of a string at a given font size
pub trait TextMeasurer: fmt::Debug {
    fn measure(&self, text: &str, font_size_px: f32) -> Result<f32, MeasureError>;
}

/// Fixed advance per character, as a fraction of the font size
///
/// Used when no font file is configured and as the deterministic measurer in tests.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    pub em_ratio: f32,
}

impl MonospaceMeasurer {
    pub fn new(em_ratio: f32) -> Self {
        Self { em_ratio }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        // Typical advance of a monospace face
        Self { em_ratio: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font_size_px: f32) -> Result<f32, MeasureError> {
        Ok(text.chars().count() as f32 * font_size_px * self.em_ratio)
    }
}

/// Glyph-advance measurement from a real font via fontdue
pub struct FontMeasurer {
    font: Font,
}

impl fmt::Debug for FontMeasurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontMeasurer")
            .field("name", &self.font.name())
            .finish()
    }
}

impl FontMeasurer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MeasureError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| MeasureError::Failed(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_file(path: &Path) -> Result<Self, MeasureError> {
        let bytes = std::fs::read(path).map_err(|e| MeasureError::FontUnavailable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes).map_err(|e| MeasureError::FontUnavailable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl TextMeasurer for FontMeasurer {
    fn measure(&self, text: &str, font_size_px: f32) -> Result<f32, MeasureError> {
        let width: f32 = text
            .chars()
            .map(|ch| self.font.metrics(ch, font_size_px).advance_width)
            .sum();
        if width.is_finite() {
            Ok(width)
        } else {
            Err(MeasureError::Failed(format!(
                "non-finite advance for {:?}",
                text
            )))
        }
    }
}

/// Build the measurer for an optional font path, falling back to monospace
pub fn measurer_for(font_path: Option<&Path>) -> Box<dyn TextMeasurer> {
    match font_path {
        Some(path) => match FontMeasurer::from_file(path) {
            Ok(measurer) => {
                tracing::info!("Measuring column text with font {}", path.display());
                Box::new(measurer)
            }
            Err(e) => {
                tracing::warn!("{}, falling back to monospace measurement", e);
                Box::new(MonospaceMeasurer::default())
            }
        },
        None => Box::new(MonospaceMeasurer::default()),
    }
}

/// Sizing constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthSettings {
    pub font_size_px: f32,
    /// Added to the measured width for sort/pin icons and cell padding
    pub padding_px: f32,
    /// Used when measurement fails
    pub default_width_px: f32,
}

impl Default for WidthSettings {
    fn default() -> Self {
        Self {
            font_size_px: 14.0,
            padding_px: 62.0,
            default_width_px: 150.0,
        }
    }
}

/// Longest display value of `field`, by character count (first one wins on ties)
pub fn longest_value(field: &str, rows: &[Row]) -> String {
    let mut longest = String::new();
    let mut max = 0;
    for row in rows {
        let value = row.get(field).display();
        let len = value.chars().count();
        if len > max {
            max = len;
            longest = value;
        }
    }
    longest
}

/// Pixel width for one column
///
/// Falls back to `settings.default_width_px` if the measurer fails.
pub fn compute_width(
    field: &str,
    rows: &[Row],
    header_label: &str,
    measurer: &dyn TextMeasurer,
    settings: &WidthSettings,
) -> f32 {
    let candidate = longest_value(field, rows);
    let measured = measurer
        .measure(&candidate, settings.font_size_px)
        .and_then(|value_width| {
            let header_width = measurer.measure(header_label, settings.font_size_px)?;
            Ok(value_width.max(header_width))
        });

    match measured {
        Ok(width) => width + settings.padding_px,
        Err(e) => {
            tracing::warn!(
                "Column '{}' width fallback to {}px: {}",
                field,
                settings.default_width_px,
                e
            );
            settings.default_width_px
        }
    }
}

/// Full recompute over every column
pub fn compute_widths(
    columns: &[Column],
    rows: &[Row],
    measurer: &dyn TextMeasurer,
    settings: &WidthSettings,
) -> ColumnWidths {
    columns
        .iter()
        .map(|col| {
            let width = compute_width(&col.field, rows, &col.header(), measurer, settings);
            (col.field.clone(), width)
        })
        .collect()
}
