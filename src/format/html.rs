//! HTML rendering for formatted replies.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{Block, FormattedContent, InlineText, ListItem, Span, Table};

/// How literal text is interpolated into markup.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EscapePolicy {
    /// Escape `& < > " '` everywhere text, cells, labels or urls are emitted.
    #[default]
    Escape,
    /// Interpolate text unchanged. Only for agents whose output is trusted markup.
    Raw,
}

/// Escape HTML-significant characters.
pub fn escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    output
}

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Whether `url` is relative or uses one of [`SAFE_SCHEMES`].
pub fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    let scheme_end = url.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(end) if url[end..].starts_with(':') => {
            let scheme = url[..end].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

/// Render content wrapped in the `formatted-response` container.
pub fn render_reply_html(content: &FormattedContent, policy: EscapePolicy) -> String {
    format!(
        "<div class=\"formatted-response\">{}</div>",
        render_html(content, policy)
    )
}

/// Render content to an HTML fragment.
pub fn render_html(content: &FormattedContent, policy: EscapePolicy) -> String {
    let mut out = Renderer { out: String::new(), policy };
    match content {
        FormattedContent::Paragraphs { paragraphs } => out.paragraphs(paragraphs),
        FormattedContent::BulletList { blocks } => {
            for block in blocks {
                match block {
                    Block::List(items) => out.list(items),
                    Block::Paragraphs(paragraphs) => out.paragraphs(paragraphs),
                }
            }
        }
        FormattedContent::Table(table) => out.table(table),
    }
    out.out
}

struct Renderer {
    out: String,
    policy: EscapePolicy,
}

impl Renderer {
    fn literal(&mut self, text: &str) {
        match self.policy {
            EscapePolicy::Escape => self.out.push_str(&escape(text)),
            EscapePolicy::Raw => self.out.push_str(text),
        }
    }

    fn inline(&mut self, text: &InlineText) {
        for span in &text.spans {
            match span {
                Span::Text { text } => self.literal(text),
                Span::Link { label, url }
                    if self.policy == EscapePolicy::Escape && !is_safe_url(url) =>
                {
                    self.literal(label);
                }
                Span::Link { label, url } => {
                    self.out.push_str("<a href=\"");
                    self.literal(url);
                    self.out
                        .push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                    self.literal(label);
                    self.out.push_str("</a>");
                }
                Span::LineBreak => self.out.push_str("<br>"),
            }
        }
    }

    fn paragraphs(&mut self, paragraphs: &[InlineText]) {
        for paragraph in paragraphs {
            self.out.push_str("<p>");
            self.inline(paragraph);
            self.out.push_str("</p>");
        }
    }

    fn list(&mut self, items: &[ListItem]) {
        self.out.push_str("<ul class=\"markdown-list\">");
        let mut item_open = false;
        let mut nested_open = false;
        for item in items {
            if item.depth > 0 && item_open {
                if !nested_open {
                    self.out.push_str("<ul class=\"markdown-list\">");
                    nested_open = true;
                }
                self.out.push_str("<li>");
                self.inline(&item.text);
                self.out.push_str("</li>");
                continue;
            }
            if nested_open {
                self.out.push_str("</ul>");
                nested_open = false;
            }
            if item_open {
                self.out.push_str("</li>");
            }
            self.out.push_str("<li>");
            self.inline(&item.text);
            item_open = true;
        }
        if nested_open {
            self.out.push_str("</ul>");
        }
        if item_open {
            self.out.push_str("</li>");
        }
        self.out.push_str("</ul>");
    }

    fn table(&mut self, table: &Table) {
        self.out
            .push_str("<div class=\"table-container\"><table class=\"markdown-table\">");
        if !table.headers.is_empty() || !table.rows.is_empty() {
            self.out.push_str("<thead><tr>");
            for header in &table.headers {
                self.out.push_str("<th>");
                self.literal(header);
                self.out.push_str("</th>");
            }
            self.out.push_str("</tr></thead><tbody>");
            for row in &table.rows {
                self.out.push_str("<tr>");
                for cell in row {
                    self.out.push_str("<td>");
                    self.literal(cell);
                    self.out.push_str("</td>");
                }
                self.out.push_str("</tr>");
            }
            self.out.push_str("</tbody>");
        }
        self.out.push_str("</table></div>");
        if let Some(trailing) = &table.trailing_text {
            self.inline(trailing);
        }
    }
}
