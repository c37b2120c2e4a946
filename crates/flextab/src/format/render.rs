//! Table rendering to Markdown and CSV.
//!
//! Rendering is pure: it walks headers and rows read-only, resolves the
//! effective descriptor per cell, and emits a text block. Width is a
//! minimum, never a maximum — padding adds spaces but content is never
//! truncated.

use crate::error::TableError;
use crate::format::spec::{Align, Descriptor, FormatKind, FormatSet};
use crate::table::Table;
use crate::value::Cell;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use unicode_width::UnicodeWidthStr;

/// Output style for [`Table::format`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Pipe-delimited Markdown table with a separator row.
    #[serde(alias = "md")]
    Markdown,
    /// RFC 4180 CSV.
    Csv,
}

impl FromStr for OutputStyle {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md" | "markdown" => Ok(OutputStyle::Markdown),
            "csv" => Ok(OutputStyle::Csv),
            other => Err(TableError::invalid_format(
                other,
                "unknown output style (expected 'markdown', 'md', or 'csv')",
            )),
        }
    }
}

/// Render a table in the requested style using a parsed format set.
pub fn render(table: &Table, style: OutputStyle, set: &FormatSet) -> Result<String, TableError> {
    match style {
        OutputStyle::Markdown => Ok(render_markdown(table, set)),
        OutputStyle::Csv => render_csv(table, set),
    }
}

/// Format one data cell: resolve the effective descriptor, produce the
/// value text, then pad to the descriptor's width.
pub fn format_cell(cell: &Cell, set: &FormatSet, column: usize) -> String {
    let desc = set.resolve(column, cell.kind());
    let text = value_text(cell, desc);
    pad(&text, desc.width, desc.align)
}

fn format_header(name: &str, set: &FormatSet, column: usize) -> String {
    let desc = set.resolve_header(column);
    pad(name, desc.width, desc.align)
}

/// Produce the unpadded text form of a cell under a descriptor.
///
/// A non-numeric cell under a forced numeric descriptor falls back to its
/// plain text form; the width/alignment of the descriptor still apply.
fn value_text(cell: &Cell, desc: &Descriptor) -> String {
    match desc.kind {
        FormatKind::String => cell.to_string(),
        FormatKind::Integer => match cell.as_f64() {
            // Truncation toward zero, never rounding.
            Some(v) if v.is_finite() => format!("{}", v.trunc() as i64),
            _ => cell.to_string(),
        },
        FormatKind::Float => match (cell.as_f64(), desc.precision) {
            (Some(v), Some(p)) => format_rounded(v, p),
            (Some(v), None) => format!("{}", v),
            (None, _) => cell.to_string(),
        },
    }
}

/// Fixed-point rendering with half-away-from-zero rounding.
///
/// `f64::round` rounds halves away from zero; scaling by `10^precision`
/// applies that at the requested decimal place, so `0.125` at precision 2
/// renders `0.13` (where round-half-to-even would give `0.12`).
fn format_rounded(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    format!("{:.*}", precision, rounded)
}

/// Pad text with spaces up to `width` display columns. Content wider than
/// `width` is returned unchanged.
fn pad(text: &str, width: Option<usize>, align: Align) -> String {
    let Some(width) = width else {
        return text.to_string();
    };
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    let fill = " ".repeat(width - current);
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

fn render_markdown(table: &Table, set: &FormatSet) -> String {
    let header_cells: Vec<String> = table
        .headers()
        .iter()
        .enumerate()
        .map(|(i, name)| format_header(name, set, i))
        .collect();

    let mut out = String::new();
    out.push_str("| ");
    out.push_str(&header_cells.join(" | "));
    out.push_str(" |\n");

    // Separator dash runs track the rendered header width, minimum 3.
    let dashes: Vec<String> = header_cells
        .iter()
        .map(|cell| "-".repeat(cell.width().max(3)))
        .collect();
    out.push('|');
    out.push_str(&dashes.join("|"));
    out.push_str("|\n");

    for row in table.values() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format_cell(cell, set, i))
            .collect();
        out.push_str("| ");
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
    }
    out
}

fn render_csv(table: &Table, set: &FormatSet) -> Result<String, TableError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let header_cells: Vec<String> = table
        .headers()
        .iter()
        .enumerate()
        .map(|(i, name)| format_header(name, set, i))
        .collect();
    wtr.write_record(&header_cells)?;

    for row in table.values() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format_cell(cell, set, i))
            .collect();
        wtr.write_record(&cells)?;
    }

    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::spec::FormatConfig;

    fn set(config: FormatConfig) -> FormatSet {
        FormatSet::parse(&config).unwrap()
    }

    #[test]
    fn integer_format_truncates_toward_zero() {
        let s = set(FormatConfig::new().float("%d"));
        assert_eq!(format_cell(&Cell::Float(3.9), &s, 0), "3");
        assert_eq!(format_cell(&Cell::Float(-3.9), &s, 0), "-3");
    }

    #[test]
    fn float_format_rounds_half_away_from_zero() {
        assert_eq!(format_rounded(3.95, 1), "4.0");
        assert_eq!(format_rounded(0.125, 2), "0.13");
        assert_eq!(format_rounded(-0.125, 2), "-0.13");
        assert_eq!(format_rounded(2.5, 0), "3");
        assert_eq!(format_rounded(2.0, 1), "2.0");
    }

    #[test]
    fn float_pads_right_zeroes_to_precision() {
        let s = set(FormatConfig::new().float("%.3f"));
        assert_eq!(format_cell(&Cell::Float(1.5), &s, 0), "1.500");
    }

    #[test]
    fn string_padding_left_and_right() {
        let s = set(FormatConfig::new().string("%-5s"));
        assert_eq!(format_cell(&Cell::Str("ab".into()), &s, 0), "ab   ");

        let s = set(FormatConfig::new().string("%5s"));
        assert_eq!(format_cell(&Cell::Str("ab".into()), &s, 0), "   ab");
    }

    #[test]
    fn width_is_a_minimum_never_truncates() {
        let s = set(FormatConfig::new().string("%2s"));
        assert_eq!(format_cell(&Cell::Str("overflow".into()), &s, 0), "overflow");
    }

    #[test]
    fn padding_is_display_width_aware() {
        // CJK characters occupy two display columns.
        let s = set(FormatConfig::new().string("%-6s"));
        assert_eq!(format_cell(&Cell::Str("日本".into()), &s, 0), "日本  ");
    }

    #[test]
    fn numeric_descriptor_on_text_falls_back_to_text() {
        let s = set(FormatConfig::new().columns(vec![Some("%8.2f")]));
        assert_eq!(format_cell(&Cell::Str("n/a".into()), &s, 0), "     n/a");
    }

    #[test]
    fn null_renders_empty() {
        let s = set(FormatConfig::new());
        assert_eq!(format_cell(&Cell::Null, &s, 0), "");
    }

    #[test]
    fn output_style_from_str() {
        assert_eq!("md".parse::<OutputStyle>().unwrap(), OutputStyle::Markdown);
        assert_eq!(
            "markdown".parse::<OutputStyle>().unwrap(),
            OutputStyle::Markdown
        );
        assert_eq!("csv".parse::<OutputStyle>().unwrap(), OutputStyle::Csv);
        assert!("tsv".parse::<OutputStyle>().is_err());
    }

    #[test]
    fn output_style_serde_aliases() {
        let md: OutputStyle = serde_json::from_str("\"md\"").unwrap();
        assert_eq!(md, OutputStyle::Markdown);
        let csv: OutputStyle = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(csv, OutputStyle::Csv);
    }
}
