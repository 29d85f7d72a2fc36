//! Itemized list rendering.
//!
//! Lines that start with a marker open a new item. Indented or otherwise
//! unmarked lines that follow are folded into the open item, so wrapped items
//! stay under one marker.

use super::classify::parse_list_item;
use super::html::{self, LINE_BREAK};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListRow {
    /// Empty for rows that appear before the first item.
    marker: String,
    lines: Vec<String>,
}

/// Accumulates rows while scanning the response.
#[derive(Debug, Default)]
struct ListBuilder {
    rows: Vec<ListRow>,
    current: Option<ListRow>,
}

impl ListBuilder {
    fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        if let Some(item) = parse_list_item(line) {
            self.flush();
            self.current = Some(ListRow {
                marker: item.marker.to_string(),
                lines: vec![item.content.to_string()],
            });
        } else if let Some(current) = self.current.as_mut() {
            current.lines.push(line.trim_start().to_string());
        } else {
            self.rows.push(ListRow {
                marker: String::new(),
                lines: vec![line.to_string()],
            });
        }
    }

    fn flush(&mut self) {
        if let Some(row) = self.current.take() {
            self.rows.push(row);
        }
    }

    fn finish(mut self) -> Vec<ListRow> {
        self.flush();
        self.rows
    }
}

fn render_row(row: &ListRow, escape_html: bool) -> String {
    let content = row
        .lines
        .iter()
        .map(|line| html::cell(line, escape_html))
        .collect::<Vec<_>>()
        .join(LINE_BREAK);
    format!(
        "<tr><td class=\"list-marker\">{}</td><td class=\"list-content\">{content}</td></tr>",
        html::cell(&row.marker, escape_html)
    )
}

pub fn render(lines: &[&str], escape_html: bool) -> String {
    let mut builder = ListBuilder::default();
    for line in lines {
        builder.push_line(line);
    }

    let mut out = String::from("<table class=\"response-list\"><tbody>");
    for row in builder.finish() {
        out.push_str(&render_row(&row, escape_html));
    }
    out.push_str("</tbody></table>");
    out
}
