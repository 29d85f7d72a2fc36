//! Small HTML string helpers shared by the renderers.

/// Markup emitted for every run of two spaces.
pub const NBSP_PAIR: &str = "&nbsp;&nbsp;";

/// Markup emitted for a line break outside code blocks.
pub const LINE_BREAK: &str = "<br>";

/// Replaces each non-overlapping `"  "` with a non-breaking-space pair.
///
/// Runs are consumed left to right, so three spaces become one pair plus a
/// regular space.
pub fn preserve_spaces(text: &str) -> String {
    text.replace("  ", NBSP_PAIR)
}

/// Escapes the five HTML-significant characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Content passes through `escape` only when the caller opted in.
pub fn content(text: &str, escape_html: bool) -> String {
    if escape_html {
        escape(text)
    } else {
        text.to_string()
    }
}

/// Inline cell content: optional escaping, then space preservation.
pub fn cell(text: &str, escape_html: bool) -> String {
    preserve_spaces(&content(text, escape_html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve_spaces_is_left_to_right() {
        assert_eq!(preserve_spaces("a  b"), "a&nbsp;&nbsp;b");
        assert_eq!(preserve_spaces("a   b"), "a&nbsp;&nbsp; b");
        assert_eq!(preserve_spaces("a    b"), "a&nbsp;&nbsp;&nbsp;&nbsp;b");
    }

    #[test]
    fn test_escape_all_special_chars() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_content_passthrough_when_not_escaping() {
        assert_eq!(content("<b>", false), "<b>");
        assert_eq!(content("<b>", true), "&lt;b&gt;");
    }
}
