//! HTML-safe rendering of user-supplied text.

use maud::{Markup, PreEscaped};

/// Escape text for embedding in HTML element content or attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape `raw` and turn every line ending into a `<br>` marker.
///
/// `\r\n`, a lone `\r` and a lone `\n` each become `<br>\n`. Escaping runs
/// first so a literal `<br>` typed by the user stays inert. Absent or empty
/// input yields empty markup.
#[must_use]
pub fn nl2br(raw: Option<&str>) -> Markup {
    match raw {
        Some(value) if !value.is_empty() => {
            let escaped = escape_html(value);
            let mut out = String::with_capacity(escaped.len());
            let mut chars = escaped.chars().peekable();
            while let Some(c) = chars.next() {
                match c {
                    '\r' => {
                        let _ = chars.next_if_eq(&'\n');
                        out.push_str("<br>\n");
                    }
                    '\n' => out.push_str("<br>\n"),
                    _ => out.push(c),
                }
            }
            PreEscaped(out)
        }
        _ => PreEscaped(String::new()),
    }
}
