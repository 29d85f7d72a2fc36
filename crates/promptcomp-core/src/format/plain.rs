//! Plain text rendering: fenced code blocks, line breaks, preserved spaces.

use std::sync::OnceLock;

use regex::Regex;

use super::html::{self, LINE_BREAK};

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    // A language word counts only when it sits alone on the opening fence line.
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:([A-Za-z0-9_+\-]+)\n)?(.*?)```").expect("code fence pattern is valid")
    })
}

/// Renders the body of a plain block (without the wrapping element).
pub fn render_body(text: &str, escape_html: bool) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;

    for caps in fence_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&render_text(&text[last..whole.start()], escape_html));

        let lang = caps.get(1).map_or("", |m| m.as_str());
        let code = caps.get(2).map_or("", |m| m.as_str()).trim();
        out.push_str(&render_code(lang, code, escape_html));

        last = whole.end();
    }

    out.push_str(&render_text(&text[last..], escape_html));
    out
}

/// Full plain block markup.
pub fn render(text: &str, escape_html: bool) -> String {
    format!(
        "<div class=\"response-text\">{}</div>",
        render_body(text, escape_html)
    )
}

fn render_text(text: &str, escape_html: bool) -> String {
    html::preserve_spaces(&html::content(text, escape_html)).replace('\n', LINE_BREAK)
}

fn render_code(lang: &str, code: &str, escape_html: bool) -> String {
    let code = html::content(code, escape_html);
    if lang.is_empty() {
        format!("<pre><code>{code}</code></pre>")
    } else {
        format!("<pre><code class=\"language-{lang}\">{code}</code></pre>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newlines_and_spaces() {
        assert_eq!(render_body("a\nb  c", false), "a<br>b&nbsp;&nbsp;c");
    }

    #[test]
    fn test_code_fence_keeps_newlines() {
        let body = render_body("Run:\n```\n  ls -la\n  pwd\n```\nDone", false);
        assert_eq!(
            body,
            "Run:<br><pre><code>ls -la\n  pwd</code></pre><br>Done"
        );
    }

    #[test]
    fn test_code_fence_language() {
        let body = render_body("```rust\nfn main() {}\n```", false);
        assert_eq!(
            body,
            "<pre><code class=\"language-rust\">fn main() {}</code></pre>"
        );
    }

    #[test]
    fn test_inline_fences() {
        let body = render_body("```a```x```ls -la```", false);
        assert_eq!(
            body,
            "<pre><code>a</code></pre>x<pre><code>ls -la</code></pre>"
        );
    }

    #[test]
    fn test_unpaired_fence_is_text() {
        assert_eq!(render_body("```\nopen", false), "```<br>open");
    }

    #[test]
    fn test_escape_applies_to_code_and_text() {
        let body = render_body("<b>\n```\n<i>\n```", true);
        assert_eq!(body, "&lt;b&gt;<br><pre><code>&lt;i&gt;</code></pre>");
    }
}
