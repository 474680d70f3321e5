//! Pipe-table conversion.

use super::{convert_links, FormattedContent, Table};

/// Build the table variant.
///
/// Every line whose trimmed form starts with `|` is a table line, wherever it
/// appears. Lines before the first table line are dropped; non-table lines after
/// it become trailing text. The second table line is the separator and is always
/// skipped, whatever it contains.
pub(crate) fn format_table(text: &str) -> FormattedContent {
    let mut table_lines = Vec::new();
    let mut after_table = Vec::new();
    let mut in_table = false;

    for line in text.split('\n') {
        if line.trim().starts_with('|') {
            in_table = true;
            table_lines.push(line);
        } else if in_table {
            after_table.push(line);
        }
    }

    let mut table = Table::default();
    if table_lines.len() >= 2 {
        table.headers = split_cells(table_lines[0]);
        table.rows = table_lines[2..].iter().map(|line| split_cells(line)).collect();
    }
    if !after_table.is_empty() {
        table.trailing_text = Some(convert_links(&after_table.join("\n")).with_line_breaks());
    }

    FormattedContent::Table(table)
}

/// Split a table line on `|`, dropping cells that are empty once trimmed.
fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(String::from)
        .collect()
}
