//! Round trips across formats
//!
//! Mirrors how the editor application moves content: stored JSON is rendered to
//! HTML, exported to Markdown, and Markdown is loaded back into the editor.

use novel_md::formats::editor::render_html;
use novel_md::formats::editor::nodes::{LinkAttrs, TaskItemAttrs};
use novel_md::{html_to_document, html_to_markdown, markdown_to_html, Document, FormatRegistry, Mark, Node};

fn task(checked: bool, text: &str) -> Node {
    Node::TaskItem {
        attrs: TaskItemAttrs { checked },
        content: vec![Node::paragraph(vec![Node::text(text)])],
    }
}

#[test]
fn test_editor_document_survives_html() {
    let document = Document::new(vec![
        Node::Heading {
            attrs: novel_md::formats::editor::nodes::HeadingAttrs { level: 3 },
            content: vec![Node::text("Heading")],
        },
        Node::TaskList {
            content: vec![task(true, "done"), task(false, "todo")],
        },
        Node::paragraph(vec![
            Node::text("See "),
            Node::marked_text(
                "the docs",
                vec![
                    Mark::Link {
                        attrs: LinkAttrs {
                            href: "https://novel.sh/docs".to_string(),
                            target: Some("_blank".to_string()),
                            rel: Some("noopener noreferrer nofollow".to_string()),
                            class: None,
                        },
                    },
                    Mark::Bold,
                ],
            ),
            Node::HardBreak,
            Node::marked_text("a & b", vec![Mark::Code]),
        ]),
        Node::HorizontalRule,
    ]);

    let html = render_html(&document).unwrap();
    assert_eq!(html_to_document(&html), document);
}

#[test]
fn test_markdown_round_trip_keeps_checked_state() {
    let md = "- [x] Buy milk\n- [ ] Walk dog";
    let html = markdown_to_html(md);
    assert_eq!(html_to_markdown(&html), md);

    let doc = html_to_document(&html);
    assert_eq!(
        doc.content,
        vec![Node::TaskList {
            content: vec![task(true, "Buy milk"), task(false, "Walk dog")],
        }]
    );
}

#[test]
fn test_nested_plain_list_is_a_markdown_fixpoint() {
    let md = html_to_markdown(include_str!("../fixtures/nested_list.html"));
    let again = html_to_markdown(&markdown_to_html(&md));
    assert_eq!(again, md);
}

#[test]
fn test_registry_pipeline_editor_to_markdown_and_back() {
    let registry = FormatRegistry::default();
    let stored = r#"{"type":"doc","content":[{"type":"taskList","content":[{"type":"taskItem","attrs":{"checked":true},"content":[{"type":"paragraph","content":[{"type":"text","text":"Ship it"}]}]}]}]}"#;

    let md = registry.convert(stored, "editor", "markdown").unwrap();
    assert_eq!(md, "- [x] Ship it");

    let json = registry.convert(&md, "markdown", "editor").unwrap();
    let reloaded: Document = serde_json::from_str(&json).unwrap();
    let original: Document = serde_json::from_str(stored).unwrap();
    assert_eq!(reloaded, original);
}
