//! Rich-text rendering of post bodies to HTML
//!
//! The content source delivers post bodies as titled blocks of rich-text
//! spans. This module turns them into markup; it never feeds back into
//! word counting, which reads only the raw span text.

use crate::content::{ContentBlock, InlineSpan, Span};
use crate::helpers::{html_escape, truncate};

/// Render a post body to HTML
pub fn render_blocks(content: &[ContentBlock]) -> String {
    let mut html = String::new();

    for block in content {
        if !block.heading.trim().is_empty() {
            html.push_str(&format!("<h2>{}</h2>\n", html_escape(&block.heading)));
        }
        for span in &block.body {
            html.push_str(&render_span(span));
            html.push('\n');
        }
    }

    html
}

/// First non-empty paragraph of a post body, truncated for listing teasers
pub fn excerpt(content: &[ContentBlock], length: usize) -> String {
    let text = content
        .iter()
        .flat_map(|block| block.body.iter())
        .map(|span| span.text.trim())
        .find(|text| !text.is_empty())
        .unwrap_or("");

    truncate(text, length, None)
}

/// Render one span, honoring its block-level kind
fn render_span(span: &Span) -> String {
    let inner = apply_inline_spans(&span.text, &span.spans);

    match span.kind.as_deref() {
        Some("heading3") => format!("<h3>{}</h3>", inner),
        Some("preformatted") => format!("<pre>{}</pre>", inner),
        Some("list-item") | Some("o-list-item") => format!("<li>{}</li>", inner),
        _ => format!("<p>{}</p>", inner),
    }
}

/// Apply inline formatting ranges (character offsets) over a text.
///
/// Ranges are assumed non-overlapping; an overlapping or empty range is
/// skipped rather than producing broken markup. Offsets past the end of
/// the text are clamped.
fn apply_inline_spans(text: &str, spans: &[InlineSpan]) -> String {
    if spans.is_empty() {
        return html_escape(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut sorted: Vec<&InlineSpan> = spans.iter().collect();
    sorted.sort_by_key(|s| s.start);

    let mut html = String::new();
    let mut pos = 0;

    for span in sorted {
        let start = span.start.min(chars.len());
        let end = span.end.min(chars.len());
        if start < pos || end <= start {
            continue;
        }

        let before: String = chars[pos..start].iter().collect();
        html.push_str(&html_escape(&before));

        let inner: String = chars[start..end].iter().collect();
        let (open, close) = inline_tags(span);
        html.push_str(&open);
        html.push_str(&html_escape(&inner));
        html.push_str(&close);

        pos = end;
    }

    let rest: String = chars[pos..].iter().collect();
    html.push_str(&html_escape(&rest));
    html
}

fn inline_tags(span: &InlineSpan) -> (String, String) {
    match span.kind.as_str() {
        "strong" => ("<strong>".to_string(), "</strong>".to_string()),
        "em" => ("<em>".to_string(), "</em>".to_string()),
        "hyperlink" => {
            let url = span
                .data
                .as_ref()
                .and_then(|data| data.get("url"))
                .and_then(|url| url.as_str())
                .unwrap_or("#");
            (
                format!(r#"<a href="{}">"#, html_escape(url)),
                "</a>".to_string(),
            )
        }
        // Unknown formatting passes the text through unwrapped
        _ => (String::new(), String::new()),
    }
}
