//! Display block types produced by the formatter.

use serde::{Deserialize, Serialize};

/// One structurally distinct unit of formatted output.
///
/// Serialized with an internal `kind` tag so the editor can switch on it:
/// `{"kind": "heading", "level": 2, "text": "Sub"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// `#`–`######` heading. `level` is always 1..=6.
    Heading { level: u8, text: String },
    /// `>` quote with the markers stripped from every line.
    Quote { text: String },
    /// Triple-backtick fenced code.
    CodeBlock {
        code: String,
        language: Option<String>,
    },
    List { ordered: bool, items: Vec<String> },
    StyledParagraph { spans: Vec<InlineSpan> },
    /// Hashtags in order of appearance, each including its leading `#`.
    HashtagGroup { tags: Vec<String> },
    Paragraph { text: String },
}

/// One inline-styled fragment within a styled paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InlineSpan {
    PlainText { text: String },
    Bold { text: String },
    Italic { text: String },
    InlineCode { text: String },
    Link { text: String, url: String },
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        InlineSpan::PlainText { text: text.into() }
    }
}
