use assisto::format::{
    convert_links, format, render_html, Block, EscapePolicy, FormattedContent, InlineText, Span,
};
use pretty_assertions::assert_eq;

#[test]
fn prose_without_markers_is_one_link_converted_paragraph() {
    let inputs = [
        "Your order ships Tuesday.",
        "Line one\nLine two with [a link](https://x.test/a)",
        "Costs are 5-10% higher; see (appendix) and [notes].",
        "",
    ];
    for input in inputs {
        assert_eq!(
            format(input),
            FormattedContent::Paragraphs {
                paragraphs: vec![convert_links(input)]
            },
            "input: {input:?}"
        );
    }
}

#[test]
fn table_example_discards_second_line() {
    let FormattedContent::Table(table) = format("|H1|H2|\n|---|---|\n|a|b|") else {
        panic!("expected table");
    };
    assert_eq!(table.headers, vec!["H1", "H2"]);
    assert_eq!(table.rows, vec![vec!["a", "b"]]);
}

#[test]
fn any_pipe_selects_table_mode() {
    for input in ["a|b", "* x | y", "|", "text\n| h |\n| - |"] {
        assert!(
            matches!(format(input), FormattedContent::Table(_)),
            "input: {input:?}"
        );
    }
}

#[test]
fn single_pipe_in_prose_renders_an_empty_table() {
    let html = render_html(
        &format("Pick option A | option B, whichever suits."),
        EscapePolicy::Escape,
    );
    assert_eq!(
        html,
        "<div class=\"table-container\"><table class=\"markdown-table\"></table></div>"
    );
}

#[test]
fn two_bullets_in_order() {
    let FormattedContent::BulletList { blocks } = format("* item1\n* item2") else {
        panic!("expected bullet list");
    };
    assert_eq!(blocks.len(), 1);
    let Block::List(items) = &blocks[0] else {
        panic!("expected list block");
    };
    let texts: Vec<String> = items.iter().map(|i| i.text.plain()).collect();
    assert_eq!(texts, vec!["item1", "item2"]);
}

#[test]
fn link_example() {
    assert_eq!(
        convert_links("[x](http://e)"),
        InlineText {
            spans: vec![Span::link("x", "http://e")]
        }
    );
    assert_eq!(
        convert_links("(see [x](http://e)!)").spans,
        vec![Span::text("(see "), Span::link("x", "http://e"), Span::text("!)")]
    );
}

#[test]
fn mixed_reply_renders_in_document_order() {
    let reply = "Summary:\n- Open POs: 12\n- Late: [3](https://erp/late)\n\nAnything else?";
    assert_eq!(
        render_html(&format(reply), EscapePolicy::Escape),
        "<p>Summary:</p>\
         <ul class=\"markdown-list\"><li>Open POs: 12</li>\
         <li>Late: <a href=\"https://erp/late\" target=\"_blank\" rel=\"noopener noreferrer\">3</a></li></ul>\
         <p>Anything else?</p>"
    );
}

#[test]
fn escaping_is_applied_in_every_branch() {
    let cases = [
        ("<b>bold</b>", "&lt;b&gt;bold&lt;/b&gt;"),
        ("* <b>bold</b>", "&lt;b&gt;bold&lt;/b&gt;"),
        ("|<b>h</b>|\n|-|\n|x|", "&lt;b&gt;h&lt;/b&gt;"),
    ];
    for (input, expected) in cases {
        let html = render_html(&format(input), EscapePolicy::Escape);
        assert!(html.contains(expected), "{input:?} -> {html}");
        assert!(!html.contains("<b>"), "{input:?} -> {html}");
    }
}
