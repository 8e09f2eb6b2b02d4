//! HTML fragment rendering for formatted blocks.
//!
//! Output is entity-escaped but is not a sanitizer: link URLs are emitted
//! as given (escaped), whatever their scheme.

use std::fmt::Write;

use crate::formatter::blocks::{Block, InlineSpan};

/// Renders blocks into one HTML fragment, one element per block, in order.
pub fn render_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        render_block(&mut out, block);
        out.push('\n');
    }
    out
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, text } => {
            let level = (*level).clamp(1, 6);
            let _ = write!(out, "<h{level}>{}</h{level}>", escape(text));
        }
        Block::Quote { text } => {
            let _ = write!(out, "<blockquote>{}</blockquote>", with_breaks(text));
        }
        Block::CodeBlock { code, language } => match language {
            Some(lang) => {
                let _ = write!(
                    out,
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    escape(lang),
                    escape(code)
                );
            }
            None => {
                let _ = write!(out, "<pre><code>{}</code></pre>", escape(code));
            }
        },
        Block::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let _ = write!(out, "<{tag}>");
            for item in items {
                let _ = write!(out, "<li>{}</li>", escape(item));
            }
            let _ = write!(out, "</{tag}>");
        }
        Block::StyledParagraph { spans } => {
            out.push_str("<p>");
            for span in spans {
                render_span(out, span);
            }
            out.push_str("</p>");
        }
        Block::HashtagGroup { tags } => {
            out.push_str("<p class=\"hashtags\">");
            for (i, tag) in tags.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "<span class=\"hashtag\">{}</span>", escape(tag));
            }
            out.push_str("</p>");
        }
        Block::Paragraph { text } => {
            let _ = write!(out, "<p>{}</p>", with_breaks(text));
        }
    }
}

fn render_span(out: &mut String, span: &InlineSpan) {
    let _ = match span {
        InlineSpan::PlainText { text } => write!(out, "{}", with_breaks(text)),
        InlineSpan::Bold { text } => write!(out, "<strong>{}</strong>", escape(text)),
        InlineSpan::Italic { text } => write!(out, "<em>{}</em>", escape(text)),
        InlineSpan::InlineCode { text } => write!(out, "<code>{}</code>", escape(text)),
        InlineSpan::Link { text, url } => {
            write!(out, "<a href=\"{}\">{}</a>", escape(url), escape(text))
        }
    };
}

fn with_breaks(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}

/// Escapes the five HTML-significant characters.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::format;

    #[test]
    fn test_renders_each_block_kind() {
        let html = render_html(&format(
            "# Title\n\n> said\n\n```rust\nlet x = 1;\n```\n\n1. one\n\n**b** [l](https://x.io)\n\n#tag #태그\n\nplain",
        ));
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(
            lines,
            vec![
                "<h1>Title</h1>",
                "<blockquote>said</blockquote>",
                "<pre><code class=\"language-rust\">let x = 1;</code></pre>",
                "<ol><li>one</li></ol>",
                "<p><strong>b</strong> <a href=\"https://x.io\">l</a></p>",
                "<p class=\"hashtags\"><span class=\"hashtag\">#tag</span> <span class=\"hashtag\">#태그</span></p>",
                "<p>plain</p>",
            ]
        );
    }

    #[test]
    fn test_escapes_markup_in_text() {
        let html = render_html(&[Block::Paragraph {
            text: "<script>alert('x')</script>".to_string(),
        }]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_line_breaks_become_br() {
        let html = render_html(&[Block::Quote {
            text: "a\nb".to_string(),
        }]);
        assert_eq!(html, "<blockquote>a<br>b</blockquote>\n");
    }

    #[test]
    fn test_code_is_escaped_without_breaks() {
        let html = render_html(&[Block::CodeBlock {
            code: "if a < b {\n}".to_string(),
            language: None,
        }]);
        assert_eq!(html, "<pre><code>if a &lt; b {\n}</code></pre>\n");
    }

    #[test]
    fn test_empty_input_renders_empty_string() {
        assert_eq!(render_html(&[]), "");
    }
}
