//! Inline span scanner: bold, italic, inline code and links.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::formatter::blocks::InlineSpan;

/// Characters that make a segment a candidate for inline styling.
pub const INLINE_MARKERS: &[char] = &['*', '_', '`', '[', ']'];

// Alternation order is the match priority at any given position:
// bold, italic, inline code, link. Spans never cross a line break.
static INLINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\*\*(?P<bold>[^\n]+?)\*\*|\*(?P<italic>[^*\n]+?)\*|`(?P<code>[^`\n]+?)`|\[(?P<label>[^\]\n]+)\]\((?P<url>[^)\s]+)\)",
    )
    .expect("inline pattern is valid")
});

pub fn has_inline_markers(segment: &str) -> bool {
    segment.contains(INLINE_MARKERS)
}

/// Splits a segment into alternating plain and styled spans.
///
/// Returns `None` when no styled run matches, so the caller can fall back
/// to a later rule instead of emitting a paragraph of plain text.
pub fn parse_spans(segment: &str) -> Option<Vec<InlineSpan>> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in INLINE_PATTERN.captures_iter(segment) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > cursor {
            spans.push(InlineSpan::plain(&segment[cursor..whole.start()]));
        }
        spans.push(styled_span(&caps));
        cursor = whole.end();
    }

    if cursor == 0 {
        return None;
    }
    if cursor < segment.len() {
        spans.push(InlineSpan::plain(&segment[cursor..]));
    }
    Some(spans)
}

fn styled_span(caps: &Captures<'_>) -> InlineSpan {
    let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

    if let Some(text) = text("bold") {
        InlineSpan::Bold { text }
    } else if let Some(text) = text("italic") {
        InlineSpan::Italic { text }
    } else if let Some(text) = text("code") {
        InlineSpan::InlineCode { text }
    } else {
        InlineSpan::Link {
            text: text("label").unwrap_or_default(),
            url: text("url").unwrap_or_default(),
        }
    }
}
