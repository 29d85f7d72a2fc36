//! Heuristic HTML rendering for backend responses.
//!
//! This module provides:
//! - `format_response()`: classify a response and render it as a table, a
//!   list, or a plain block
//! - `format_for_display()`: line breaks and spaces only, no classification
//! - `classify()`: the shape decision on its own
//!
//! Table rendering failures fall back to the plain block. Output is not HTML
//! escaped unless `FormatOptions::escape_html` is set.

mod classify;
mod html;
mod list;
mod plain;
mod table;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

pub use classify::{
    ListItem, Shape, TableDetection, classify, classify_lines, is_list, is_list_item,
    is_loose_table, is_strict_table, parse_list_item,
};
pub use table::TableError;

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Which table heuristic decides the `Table` shape.
    pub table_detection: TableDetection,
    /// Escape `& < > " '` in response content before inserting markup.
    pub escape_html: bool,
}

/// Stateless formatter bound to a set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFormatter {
    options: FormatOptions,
}

impl ResponseFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> FormatOptions {
        self.options
    }

    pub fn classify(&self, raw: &str) -> Shape {
        classify(raw, self.options.table_detection)
    }

    pub fn format(&self, raw: &str) -> String {
        format_response(raw, &self.options)
    }
}

pub(crate) fn normalize_newlines(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Renders `raw` as HTML. Never fails; empty input yields an empty string.
pub fn format_response(raw: &str, options: &FormatOptions) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = normalize_newlines(raw);
    let lines: Vec<&str> = text.split('\n').collect();
    let shape = classify_lines(&lines, options.table_detection);
    tracing::debug!(
        shape = %shape,
        lines = lines.len(),
        detection = ?options.table_detection,
        "formatting response"
    );

    match shape {
        Shape::Table => match table::render(&lines, options.escape_html) {
            Ok(markup) => markup,
            Err(err) => {
                tracing::debug!(error = %err, "table rendering failed, using plain text");
                plain::render(&text, options.escape_html)
            }
        },
        Shape::List => list::render(&lines, options.escape_html),
        Shape::Plain => plain::render(&text, options.escape_html),
    }
}

/// Converts newlines to `<br>` and double spaces to non-breaking pairs.
pub fn format_for_display(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    html::preserve_spaces(&normalize_newlines(raw)).replace('\n', html::LINE_BREAK)
}
