//! Shape classification for raw responses.
//!
//! Each heuristic is a named predicate over the line sequence so the two
//! table-detection revisions can be selected and tested side by side.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The rendering shape chosen for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Pipe-delimited rows rendered as an HTML table.
    Table,
    /// Itemized lines rendered as marker/content rows.
    List,
    /// Everything else: paragraphs and fenced code.
    Plain,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Table => "table",
            Shape::List => "list",
            Shape::Plain => "plain",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which table heuristic to apply.
///
/// `Strict` wants a header row, a dashed separator row and a data row on the
/// first three lines. `Loose` fires on any line holding two pipes, which also
/// catches ordinary sentences such as `use a | b | c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableDetection {
    #[default]
    Strict,
    Loose,
}

impl TableDetection {
    pub fn detects(self, lines: &[&str]) -> bool {
        match self {
            TableDetection::Strict => is_strict_table(lines),
            TableDetection::Loose => is_loose_table(lines),
        }
    }
}

impl std::str::FromStr for TableDetection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(TableDetection::Strict),
            "loose" => Ok(TableDetection::Loose),
            other => Err(format!(
                "unknown table detection '{other}' (expected strict or loose)"
            )),
        }
    }
}

/// A list item split into its marker and the text after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem<'a> {
    pub marker: &'a str,
    pub content: &'a str,
}

fn list_item_regex() -> &'static Regex {
    static LIST_ITEM: OnceLock<Regex> = OnceLock::new();
    LIST_ITEM.get_or_init(|| {
        Regex::new(r"^\s*(\d+[.):]|[*\x{2022}-])\s+(.*)$").expect("list item pattern is valid")
    })
}

/// Splits `line` into marker and content when it starts a list item.
///
/// Markers: digits followed by `.`, `)` or `:`; `*`; `-`; `•`. The marker
/// must be followed by whitespace.
pub fn parse_list_item(line: &str) -> Option<ListItem<'_>> {
    let caps = list_item_regex().captures(line)?;
    let marker = caps.get(1)?.as_str();
    let content = caps.get(2).map_or("", |m| m.as_str());
    Some(ListItem { marker, content })
}

pub fn is_list_item(line: &str) -> bool {
    list_item_regex().is_match(line)
}

/// Header, dashed separator and first data row on lines 0..=2.
pub fn is_strict_table(lines: &[&str]) -> bool {
    match lines {
        [header, separator, row, ..] => {
            header.contains('|')
                && separator.contains('|')
                && separator.contains('-')
                && row.contains('|')
        }
        _ => false,
    }
}

/// Any line with at least two pipes.
pub fn is_loose_table(lines: &[&str]) -> bool {
    lines.iter().any(|line| line.matches('|').count() >= 2)
}

pub fn is_list(lines: &[&str]) -> bool {
    lines.iter().any(|line| is_list_item(line))
}

/// Classifies an already-split line sequence. First match wins.
pub fn classify_lines(lines: &[&str], detection: TableDetection) -> Shape {
    if detection.detects(lines) {
        Shape::Table
    } else if is_list(lines) {
        Shape::List
    } else {
        Shape::Plain
    }
}

/// Classifies raw response text.
pub fn classify(raw: &str, detection: TableDetection) -> Shape {
    if raw.is_empty() {
        return Shape::Plain;
    }
    let normalized = super::normalize_newlines(raw);
    let lines: Vec<&str> = normalized.split('\n').collect();
    classify_lines(&lines, detection)
}
