//! Pipe-delimited table rendering.

use thiserror::Error;

use super::html;
use super::plain;

/// Why a pipe-delimited block could not be rendered as a table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("no line contains a pipe delimiter")]
    MissingHeader,
    #[error("header row on line {line} has no named columns")]
    EmptyHeader { line: usize },
}

/// Table cells collected before rendering.
#[derive(Debug, Clone, Default)]
struct TableBuffer {
    /// Header row cells (raw text).
    header: Vec<String>,
    /// Data rows (raw text).
    rows: Vec<Vec<String>>,
}

impl TableBuffer {
    fn render(&self, escape_html: bool) -> String {
        let mut out = String::from("<table class=\"response-table\"><thead><tr>");
        for cell in &self.header {
            out.push_str("<th>");
            out.push_str(&html::cell(cell, escape_html));
            out.push_str("</th>");
        }
        out.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            out.push_str("<tr>");
            for cell in row {
                out.push_str("<td>");
                out.push_str(&html::cell(cell, escape_html));
                out.push_str("</td>");
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
        out
    }
}

/// Header fields: trimmed, empty ones discarded.
fn header_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(String::from)
        .collect()
}

/// Row fields: the empty edges produced by leading and trailing pipes are
/// dropped, empty interior cells are kept.
fn row_cells(line: &str) -> Vec<String> {
    let mut fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.first().is_some_and(|f| f.is_empty()) {
        fields.remove(0);
    }
    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields.into_iter().map(String::from).collect()
}

fn is_separator(line: &str) -> bool {
    line.contains('|') && line.contains('-')
}

/// Renders lines as a table, with any text before the header row kept as a
/// plain block in front of it.
pub fn render(lines: &[&str], escape_html: bool) -> Result<String, TableError> {
    let header_idx = lines
        .iter()
        .position(|line| line.contains('|'))
        .ok_or(TableError::MissingHeader)?;

    let header = header_cells(lines[header_idx]);
    if header.is_empty() {
        return Err(TableError::EmptyHeader { line: header_idx });
    }

    let mut data_start = header_idx + 1;
    if lines.get(data_start).is_some_and(|line| is_separator(line)) {
        data_start += 1;
    }

    let rows = lines
        .iter()
        .skip(data_start)
        .filter(|line| !line.trim().is_empty() && line.contains('|'))
        .map(|line| row_cells(line))
        .collect();

    let buffer = TableBuffer { header, rows };

    let mut out = String::new();
    let preamble = lines[..header_idx].join("\n");
    if !preamble.trim().is_empty() {
        out.push_str(&plain::render(preamble.trim(), escape_html));
    }
    out.push_str(&buffer.render(escape_html));
    Ok(out)
}
