//! Bullet-list conversion.

use std::sync::LazyLock;

use regex::Regex;

use super::{convert_links, Block, FormattedContent, InlineText, ListItem};

static ANY_BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*[*\-]\s+").expect("bullet detection regex must compile")
});

static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*\-]\s+").expect("bullet item regex must compile"));

/// Columns of extra indentation that nest an item under the previous one.
const NEST_INDENT: usize = 2;
const TAB_WIDTH: usize = 4;

/// Whether any line (possibly indented) starts with a bullet marker.
pub(crate) fn has_bullets(text: &str) -> bool {
    ANY_BULLET_RE.is_match(text)
}

/// Build the bullet-list variant: list runs and paragraphs in document order.
pub(crate) fn format_bullets(text: &str) -> FormattedContent {
    let mut builder = BlockBuilder::default();

    for raw in text.split('\n') {
        let line = raw.trim();
        if let Some(marker) = ITEM_RE.find(line) {
            builder.item(indentation(raw), convert_links(&line[marker.end()..]));
        } else if line.is_empty() {
            builder.flush();
        } else {
            builder.paragraph(convert_links(line));
        }
    }

    FormattedContent::BulletList {
        blocks: builder.finish(),
    }
}

fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    items: Vec<ListItem>,
    base_indent: usize,
    paragraphs: Vec<InlineText>,
}

impl BlockBuilder {
    fn item(&mut self, indent: usize, text: InlineText) {
        self.flush_paragraphs();
        let depth = if self.items.is_empty() {
            self.base_indent = indent;
            0
        } else if indent >= self.base_indent + NEST_INDENT {
            1
        } else {
            0
        };
        self.items.push(ListItem { text, depth });
    }

    fn paragraph(&mut self, text: InlineText) {
        self.flush_items();
        self.paragraphs.push(text);
    }

    fn flush(&mut self) {
        self.flush_items();
        self.flush_paragraphs();
    }

    fn flush_items(&mut self) {
        if !self.items.is_empty() {
            self.blocks.push(Block::List(std::mem::take(&mut self.items)));
        }
    }

    fn flush_paragraphs(&mut self) {
        if !self.paragraphs.is_empty() {
            self.blocks
                .push(Block::Paragraphs(std::mem::take(&mut self.paragraphs)));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}
