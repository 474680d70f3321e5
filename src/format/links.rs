//! Markdown-style `[label](url)` link conversion.

use std::sync::LazyLock;

use regex::Regex;

use super::{InlineText, Span};

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex must compile")
});

/// Resolve every `[label](url)` occurrence into a link span.
///
/// Labels and urls are not scanned again, and text around a match is kept
/// byte for byte. Empty input yields no spans.
pub fn convert_links(text: &str) -> InlineText {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in LINK_RE.captures_iter(text) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::text(&text[last..whole.start()]));
        }
        spans.push(Span::link(label.as_str(), url.as_str()));
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::text(&text[last..]));
    }

    InlineText { spans }
}
