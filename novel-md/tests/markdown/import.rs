//! Import tests for Markdown format (Markdown → HTML)

use novel_md::format::Format;
use novel_md::formats::markdown::MarkdownFormat;
use novel_md::{FormatRegistry, Node};

fn to_html(md: &str) -> String {
    novel_md::markdown_to_html(md)
}

#[test]
fn test_task_lines_become_one_task_list() {
    let html = to_html("- [ ] Task one\n- [x] Task two");
    assert_eq!(html.matches("<ul>").count(), 1);
    assert_eq!(html.matches("<li ").count(), 2);

    let first = html.find(r#"data-checked="false""#).expect("unchecked item");
    let second = html.find(r#"data-checked="true""#).expect("checked item");
    assert!(first < second);
}

#[test]
fn test_task_list_loads_as_editor_task_list() {
    let html = to_html("- [ ] Task one\n- [x] Task two");
    let doc = novel_md::html_to_document(&html);
    let Node::TaskList { content } = &doc.content[0] else {
        panic!("expected a task list, got {doc:?}");
    };
    assert_eq!(content.len(), 2);
}

#[test]
fn test_surrounding_markdown_is_rendered() {
    let html = to_html("# Plan\n\n- [x] Write\n- [ ] Review\n\nSee **notes**.");
    assert!(html.starts_with("<h1>Plan</h1>\n"));
    assert!(html.contains("<p>See <strong>notes</strong>.</p>"));
    assert!(!html.contains("<p></p>"));
}

#[test]
fn test_plain_markdown_matches_commonmark() {
    assert_eq!(
        to_html("Hello *world*\n\n---\n\n> quote"),
        "<p>Hello <em>world</em></p>\n<hr />\n<blockquote>\n<p>quote</p>\n</blockquote>\n"
    );
}

#[test]
fn test_format_parse_goes_through_registry() {
    let registry = FormatRegistry::default();
    let direct = MarkdownFormat::default().parse("- [x] done").unwrap();
    let via_registry = registry.parse("- [x] done", "markdown").unwrap();
    assert_eq!(direct, via_registry);
}
