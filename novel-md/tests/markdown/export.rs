//! Export tests for Markdown format (HTML → Markdown)

use novel_md::format::Format;
use novel_md::formats::markdown::serializer::html_to_markdown;
use novel_md::formats::markdown::MarkdownFormat;
use novel_md::task::{render_task_item, TASK_ITEM_CLASS};
use novel_md::HtmlToMarkdownOptions;

fn to_md(html: &str) -> String {
    novel_md::html_to_markdown(html)
}

#[test]
fn test_task_list_fixture() {
    let md = to_md(include_str!("../fixtures/task_list.html"));
    assert_eq!(
        md,
        "## Groceries\n\n- [x] Buy milk\n- [ ] Walk the dog\n\nRemember the **receipt**."
    );
}

#[test]
fn test_nested_list_fixture() {
    let md = to_md(include_str!("../fixtures/nested_list.html"));
    assert_eq!(
        md,
        "- Fruit  \n   - Apple  \n   - Pear  \n      1. Conference\n- Bread"
    );
}

#[test]
fn test_kitchensink_fixture() {
    let md = to_md(include_str!("../fixtures/kitchensink.html"));

    assert!(md.starts_with("# Novel\n\n"));
    assert!(md.contains("A [Notion-style](https://novel.sh) editor with _AI_ ~~magic~~ completions."));
    assert!(md.contains("> Write something, or press '/' for commands."));
    assert!(md.contains("\n- [ ] Ship the release\n"));
    assert!(md.contains("1. Second\n2. Third"));
    assert!(md.contains("```ts\nconst editor = useEditor();\n```"));
    assert!(md.contains("\n---\n"));
    assert!(md.contains("Inline `code` and a  \nbreak."));
    assert!(md.ends_with("![Novel](https://novel.sh/og.png)"));
    assert!(!md.contains("alert"));
}

#[test]
fn test_format_serialize_uses_options() {
    let format = MarkdownFormat::new(
        HtmlToMarkdownOptions {
            bullet_marker: '+',
            strong_delimiter: "__".to_string(),
            ..Default::default()
        },
        Default::default(),
    );
    let md = format
        .serialize("<ul><li><b>bold</b></li></ul>")
        .expect("markdown serialization is infallible");
    assert_eq!(md, "+ __bold__");
}

#[test]
fn test_task_items_in_plain_list_keep_their_checkbox() {
    let html = format!(
        "<ul>{}<li>plain</li>{}</ul>",
        render_task_item(true, "<p>first</p>"),
        render_task_item(false, "<p>third</p>")
    );
    assert_eq!(to_md(&html), "- [x] first\n- plain\n- [ ] third");
}

#[test]
fn test_task_item_with_multiline_content() {
    let html = format!(
        r#"<ul><li class="{TASK_ITEM_CLASS}" data-checked="false"><p>line one</p><p>line two</p></li></ul>"#
    );
    assert_eq!(to_md(&html), "- [ ] line one  \nline two");
}

#[test]
fn test_malformed_html_still_converts() {
    assert_eq!(to_md("<ul><li>open<li>second"), "- open\n- second");
    assert_eq!(to_md("<p>unclosed <b>bold"), "unclosed **bold**");
}

#[test]
fn test_full_document_uses_body() {
    let html = "<!DOCTYPE html><html><head><title>ignored</title></head><body><p>kept</p></body></html>";
    assert_eq!(
        html_to_markdown(html, &HtmlToMarkdownOptions::default()),
        "kept"
    );
}
