//! Reply formatting: raw agent text to structured, render-ready content.
//!
//! The formatter recognises a deliberately small Markdown subset. Detection runs
//! in a fixed order and the first match wins:
//!
//! 1. any `|` in the text selects table mode,
//! 2. any line starting with `*` or `-` plus whitespace selects bullet mode,
//! 3. everything else is one paragraph.
//!
//! Table detection is global: a single pipe in prose is enough to route the
//! reply into table mode, even when no line actually starts with `|`.
//!
//! ```
//! use assisto::format::{format, FormattedContent};
//!
//! let content = format("|H1|H2|\n|---|---|\n|a|b|");
//! match content {
//!     FormattedContent::Table(table) => {
//!         assert_eq!(table.headers, vec!["H1", "H2"]);
//!         assert_eq!(table.rows, vec![vec!["a", "b"]]);
//!     }
//!     other => panic!("expected a table, got {other:?}"),
//! }
//! ```

pub mod bullets;
pub mod html;
pub mod links;
pub mod plain;
pub mod table;

pub use html::{render_html, render_reply_html, EscapePolicy};
pub use links::convert_links;

use serde::Serialize;

/// Structured reply content. Exactly one variant is produced per input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormattedContent {
    Paragraphs { paragraphs: Vec<InlineText> },
    BulletList { blocks: Vec<Block> },
    Table(Table),
}

/// One segment of a bullet-mode reply, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Block {
    List(Vec<ListItem>),
    Paragraphs(Vec<InlineText>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub text: InlineText,
    /// `0` for top-level items, `1` for items nested under the previous one.
    pub depth: u8,
}

/// A table with header cells, data rows and optional text after it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub trailing_text: Option<InlineText>,
}

/// Literal text with resolved links.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InlineText {
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Span {
    Text { text: String },
    Link { label: String, url: String },
    LineBreak,
}

impl Span {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            url: url.into(),
        }
    }
}

impl InlineText {
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Visible text: link labels in place of links, `\n` for line breaks.
    pub fn plain(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            match span {
                Span::Text { text } => out.push_str(text),
                Span::Link { label, .. } => out.push_str(label),
                Span::LineBreak => out.push('\n'),
            }
        }
        out
    }

    /// Iterate over `(label, url)` pairs in order.
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.spans.iter().filter_map(|span| match span {
            Span::Link { label, url } => Some((label.as_str(), url.as_str())),
            _ => None,
        })
    }

    /// Split every text span on `\n`, inserting explicit line breaks. Link
    /// labels keep their newlines.
    pub(crate) fn with_line_breaks(self) -> Self {
        let mut spans = Vec::with_capacity(self.spans.len());
        for span in self.spans {
            match span {
                Span::Text { text } => {
                    for (i, part) in text.split('\n').enumerate() {
                        if i > 0 {
                            spans.push(Span::LineBreak);
                        }
                        if !part.is_empty() {
                            spans.push(Span::text(part));
                        }
                    }
                }
                other => spans.push(other),
            }
        }
        Self { spans }
    }
}

/// Map raw agent reply text to structured content.
pub fn format(text: &str) -> FormattedContent {
    if text.contains('|') {
        table::format_table(text)
    } else if bullets::has_bullets(text) {
        bullets::format_bullets(text)
    } else {
        FormattedContent::Paragraphs {
            paragraphs: vec![convert_links(text)],
        }
    }
}
