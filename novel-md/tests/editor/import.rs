//! Import tests for editor format (HTML → editor JSON)

use insta::assert_snapshot;
use novel_md::format::Format;
use novel_md::formats::editor::nodes::{HeadingAttrs, ImageAttrs, OrderedListAttrs};
use novel_md::formats::editor::EditorFormat;
use novel_md::{html_to_document, Mark, Node};

fn compact_json(html: &str) -> String {
    EditorFormat::new(false).serialize(html).unwrap()
}

#[test]
fn test_paragraph_json() {
    assert_snapshot!(
        compact_json("<p>Hello <em>world</em></p>"),
        @r#"{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"Hello "},{"type":"text","text":"world","marks":[{"type":"italic"}]}]}]}"#
    );
}

#[test]
fn test_empty_html_json() {
    assert_snapshot!(compact_json(""), @r#"{"type":"doc","content":[{"type":"paragraph"}]}"#);
}

#[test]
fn test_task_list_pretty_json() {
    let json = EditorFormat::default()
        .serialize(r#"<ul data-type="taskList"><li data-type="taskItem" data-checked="true"><p>Buy milk</p></li></ul>"#)
        .unwrap();
    assert_snapshot!(json, @r#"
    {
      "type": "doc",
      "content": [
        {
          "type": "taskList",
          "content": [
            {
              "type": "taskItem",
              "attrs": {
                "checked": true
              },
              "content": [
                {
                  "type": "paragraph",
                  "content": [
                    {
                      "type": "text",
                      "text": "Buy milk"
                    }
                  ]
                }
              ]
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn test_kitchensink_structure() {
    let doc = html_to_document(include_str!("../fixtures/kitchensink.html"));
    let kinds: Vec<&str> = doc
        .content
        .iter()
        .map(|node| match node {
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::Blockquote { .. } => "blockquote",
            Node::BulletList { .. } => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::TaskList { .. } => "taskList",
            Node::CodeBlock { .. } => "codeBlock",
            Node::HorizontalRule => "horizontalRule",
            Node::Image { .. } => "image",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "blockquote",
            "taskList",
            "orderedList",
            "codeBlock",
            "horizontalRule",
            "paragraph",
            "image",
        ]
    );

    assert_eq!(
        doc.content[0],
        Node::Heading {
            attrs: HeadingAttrs { level: 1 },
            content: vec![Node::text("Novel")],
        }
    );
    assert!(matches!(
        doc.content[4],
        Node::OrderedList {
            attrs: OrderedListAttrs { start: 2 },
            ..
        }
    ));
    assert_eq!(
        doc.content[8],
        Node::Image {
            attrs: ImageAttrs {
                src: "https://novel.sh/og.png".to_string(),
                alt: Some("Novel".to_string()),
                title: None,
            }
        }
    );
}

#[test]
fn test_kitchensink_inline_marks() {
    let doc = html_to_document(include_str!("../fixtures/kitchensink.html"));
    let Node::Paragraph { content } = &doc.content[1] else {
        panic!("expected paragraph");
    };
    let marked: Vec<(&str, &[Mark])> = content
        .iter()
        .filter_map(|node| match node {
            Node::Text { text, marks } if !marks.is_empty() => {
                Some((text.as_str(), marks.as_slice()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(marked.len(), 3);
    assert_eq!(marked[0].0, "Notion-style");
    assert!(matches!(marked[0].1, [Mark::Link { .. }]));
    assert_eq!(marked[1], ("AI", &[Mark::Italic][..]));
    assert_eq!(marked[2], ("magic", &[Mark::Strike][..]));
}

#[test]
fn test_inline_code_and_hard_break_paragraph() {
    let doc = html_to_document("<p>Inline <code>code</code> and a<br>break.</p>");
    assert_eq!(
        doc.content,
        vec![Node::paragraph(vec![
            Node::text("Inline "),
            Node::marked_text("code", vec![Mark::Code]),
            Node::text(" and a"),
            Node::HardBreak,
            Node::text("break."),
        ])]
    );
}
