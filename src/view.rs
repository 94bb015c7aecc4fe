//! Text rendering of the grid
//!
//! Turns a [`RenderModel`] into a terminal table or a CSV export. Pixel
//! widths from the column sizer are converted to character cells using the
//! width of one glyph, so the relative proportions of the columns survive.

use std::io::Write;

use crate::grid::{RenderColumn, RenderModel};
use crate::model::{CellValue, ColumnKind, SortDirection};
use crate::theme::Theme;

/// Shown for cells the row doesn't carry
pub const ABSENT_CELL: &str = "-";

/// Glyph for the active sort direction
pub fn sort_marker(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::None => "",
        SortDirection::Ascending => " ▲",
        SortDirection::Descending => " ▼",
    }
}

/// Check if a string looks like a number (for right-alignment)
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok()
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

fn pad(s: &str, width: usize, right_align: bool) -> String {
    let text = truncate_text(s, width);
    let fill = width.saturating_sub(text.chars().count());
    if right_align {
        format!("{}{}", " ".repeat(fill), text)
    } else {
        format!("{}{}", text, " ".repeat(fill))
    }
}

/// How to turn pixels into character cells, and whether to color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    /// Width of one glyph in pixels
    pub char_width_px: f32,
    /// Emit 24-bit ANSI colors from the theme
    pub ansi: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            // 14px font, 0.6em advance
            char_width_px: 8.4,
            ansi: false,
        }
    }
}

impl TableStyle {
    /// Character cells for a pixel width, never less than 3
    pub fn cells_for(&self, width_px: f32) -> usize {
        let cells = (width_px / self.char_width_px.max(1.0)).round();
        (cells as usize).max(3)
    }
}

fn cell_text(value: &CellValue) -> String {
    if value.is_absent() {
        ABSENT_CELL.to_string()
    } else {
        value.display()
    }
}

fn header_text(column: &RenderColumn<'_>) -> String {
    format!("{}{}", column.column.header(), sort_marker(column.sort))
}

/// Separator after a column: heavier after the last pinned one
fn separator(columns: &[RenderColumn<'_>], index: usize) -> &'static str {
    let pinned_edge = columns[index].pinned
        && columns
            .get(index + 1)
            .map(|next| !next.pinned)
            .unwrap_or(false);
    if pinned_edge {
        " ║ "
    } else {
        " │ "
    }
}

/// Render the presented rows as a text table with a status footer
pub fn render_table(model: &RenderModel<'_>, theme: &Theme, style: &TableStyle) -> String {
    let widths: Vec<usize> = model
        .columns
        .iter()
        .map(|c| style.cells_for(c.width))
        .collect();
    let reset = if style.ansi { "\x1b[0m" } else { "" };
    let mut out = String::new();

    // Header
    if style.ansi {
        out.push_str(&theme.header_background.ansi_bg());
        out.push_str(&theme.header_foreground.ansi_fg());
    }
    for (i, column) in model.columns.iter().enumerate() {
        out.push_str(&pad(&header_text(column), widths[i], false));
        if i + 1 < model.columns.len() {
            out.push_str(separator(&model.columns, i));
        }
    }
    out.push_str(reset);
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    if style.ansi {
        out.push_str(&theme.border.ansi_fg());
    }
    out.push_str(&rule.join("─┼─"));
    out.push_str(reset);
    out.push('\n');

    // Body
    for (row_number, row) in model.rows.iter().enumerate() {
        let row_bg = if row_number % 2 == 1 {
            theme.row_alt_background
        } else {
            theme.background
        };
        for (i, column) in model.columns.iter().enumerate() {
            let value = row.get(&column.column.field);
            let text = cell_text(value);
            let right_align = column.column.kind == ColumnKind::Number || is_number(&text);
            if style.ansi {
                let bg = if column.pinned {
                    theme.pinned_background
                } else {
                    row_bg
                };
                out.push_str(&bg.ansi_bg());
                let fg = if value.is_absent() {
                    theme.muted_foreground
                } else {
                    theme.foreground
                };
                out.push_str(&fg.ansi_fg());
            }
            out.push_str(&pad(&text, widths[i], right_align));
            if i + 1 < model.columns.len() {
                out.push_str(separator(&model.columns, i));
            }
        }
        out.push_str(reset);
        out.push('\n');
    }

    if style.ansi {
        out.push_str(&theme.muted_foreground.ansi_fg());
    }
    out.push_str(&model.status_line());
    out.push_str(reset);
    out.push('\n');
    out
}

/// Write the presented view as CSV: header labels, then one record per row
///
/// Absent cells are written as empty fields.
pub fn export_csv<W: Write>(model: &RenderModel<'_>, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(model.columns.iter().map(|c| c.column.header()))?;
    for row in &model.rows {
        wtr.write_record(
            model
                .columns
                .iter()
                .map(|c| row.get(&c.column.field).display()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}
