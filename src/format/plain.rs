//! Plain-text rendering for terminals.

use super::{Block, FormattedContent, InlineText, Span};

/// Render content as readable plain text. Links show as `label <url>`.
pub fn render_text(content: &FormattedContent) -> String {
    let mut lines: Vec<String> = Vec::new();
    match content {
        FormattedContent::Paragraphs { paragraphs } => {
            lines.extend(paragraphs.iter().map(inline));
        }
        FormattedContent::BulletList { blocks } => {
            for block in blocks {
                match block {
                    Block::List(items) => lines.extend(items.iter().map(|item| {
                        let indent = "  ".repeat(usize::from(item.depth));
                        format!("{indent}• {}", inline(&item.text))
                    })),
                    Block::Paragraphs(paragraphs) => lines.extend(paragraphs.iter().map(inline)),
                }
            }
        }
        FormattedContent::Table(table) => {
            let widths = column_widths(&table.headers, &table.rows);
            if !table.headers.is_empty() {
                lines.push(row_line(&table.headers, &widths));
                lines.push(
                    widths
                        .iter()
                        .map(|w| "-".repeat(*w))
                        .collect::<Vec<_>>()
                        .join("-+-"),
                );
            }
            lines.extend(table.rows.iter().map(|row| row_line(row, &widths)));
            if let Some(trailing) = &table.trailing_text {
                lines.push(inline(trailing));
            }
        }
    }
    lines.join("\n")
}

fn inline(text: &InlineText) -> String {
    let mut out = String::new();
    for span in &text.spans {
        match span {
            Span::Text { text } => out.push_str(text),
            Span::Link { label, url } => {
                out.push_str(label);
                out.push_str(" <");
                out.push_str(url);
                out.push('>');
            }
            Span::LineBreak => out.push('\n'),
        }
    }
    out
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }
    widths
}

fn row_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
