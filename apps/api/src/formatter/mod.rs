//! Content Formatter: turns generated text into ordered display blocks.
//!
//! Flow: trim → split on blank lines → classify each segment by the first
//! matching rule (heading, quote, code, list, inline styles, hashtags,
//! paragraph). Classification is total: anything unrecognized becomes a
//! paragraph, so `format` has no error path.

use std::sync::LazyLock;

use regex::Regex;

pub mod blocks;
pub mod handlers;
pub mod html;
pub mod inline;
pub mod segment;

pub use blocks::Block;

use crate::formatter::inline::{has_inline_markers, parse_spans};
use crate::formatter::segment::split_segments;

const FENCE: &str = "```";

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A(#{1,6})\s+(.*)\z").expect("heading pattern is valid")
});

static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\d+\.\s").expect("ordered marker pattern is valid"));

static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[-*+]\s").expect("bullet marker pattern is valid"));

// Strips either marker kind from any line of a list segment.
static ANY_LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A\s*(?:\d+\.|[-*+])\s+").expect("list marker pattern is valid")
});

// `\w` is Unicode-aware, so Hangul, CJK, accented Latin etc. are tag characters.
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("hashtag pattern is valid"));

/// Formats raw generated text into display blocks, preserving input order.
///
/// Empty or whitespace-only input yields no blocks.
pub fn format(raw: &str) -> Vec<Block> {
    let text = raw.trim();
    if text.is_empty() {
        return Vec::new();
    }

    split_segments(text)
        .iter()
        .map(|segment| classify(segment))
        .collect()
}

/// Classifies one trimmed, non-empty segment. First matching rule wins.
pub fn classify(segment: &str) -> Block {
    heading(segment)
        .or_else(|| quote(segment))
        .or_else(|| code_block(segment))
        .or_else(|| list(segment))
        .or_else(|| styled_paragraph(segment))
        .or_else(|| hashtag_group(segment))
        .unwrap_or_else(|| Block::Paragraph {
            text: segment.to_string(),
        })
}

fn heading(segment: &str) -> Option<Block> {
    let caps = HEADING.captures(segment)?;
    let marker = caps.get(1)?.as_str();
    let text = caps.get(2)?.as_str().trim();
    if text.is_empty() {
        return None;
    }
    Some(Block::Heading {
        level: marker.len() as u8,
        text: text.to_string(),
    })
}

fn quote(segment: &str) -> Option<Block> {
    if !segment.starts_with('>') {
        return None;
    }
    let text = segment
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix("> ")
                .or_else(|| line.strip_prefix('>'))
                .unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n");
    Some(Block::Quote { text })
}

fn code_block(segment: &str) -> Option<Block> {
    let rest = segment.strip_prefix(FENCE)?;

    let Some((first_line, body)) = rest.split_once('\n') else {
        // ```code``` holds code; a bare opening fence holds at most a language.
        let block = match rest.strip_suffix(FENCE) {
            Some(code) => Block::CodeBlock {
                code: code.trim().to_string(),
                language: None,
            },
            None => Block::CodeBlock {
                code: String::new(),
                language: language_tag(rest),
            },
        };
        return Some(block);
    };

    // Anything after the closing fence is not code and is dropped.
    let code = body
        .lines()
        .take_while(|line| !line.trim_start().starts_with(FENCE))
        .collect::<Vec<_>>()
        .join("\n");

    Some(Block::CodeBlock {
        code,
        language: language_tag(first_line),
    })
}

fn language_tag(line: &str) -> Option<String> {
    Some(line.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
}

fn list(segment: &str) -> Option<Block> {
    let first_line = segment.lines().next()?;
    let ordered = if ORDERED_MARKER.is_match(first_line) {
        true
    } else if BULLET_MARKER.is_match(first_line) {
        false
    } else {
        return None;
    };

    let items = segment
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| ANY_LIST_MARKER.replace(line, "").trim().to_string())
        .collect();

    Some(Block::List { ordered, items })
}

fn styled_paragraph(segment: &str) -> Option<Block> {
    if !has_inline_markers(segment) {
        return None;
    }
    parse_spans(segment).map(|spans| Block::StyledParagraph { spans })
}

fn hashtag_group(segment: &str) -> Option<Block> {
    if !segment.contains('#') {
        return None;
    }
    // Non-tag text is dropped here; callers that need it still have the
    // raw text from the generation response.
    let tags: Vec<String> = HASHTAG
        .find_iter(segment)
        .map(|m| m.as_str().to_string())
        .collect();
    if tags.is_empty() {
        return None;
    }
    Some(Block::HashtagGroup { tags })
}
