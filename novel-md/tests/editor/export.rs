//! Export tests for editor format (editor JSON → HTML)

use novel_md::format::Format;
use novel_md::formats::editor::{render_html, EditorFormat};
use novel_md::{Document, FormatError};

const STORED_DOCUMENT: &str = r#"{
  "type": "doc",
  "content": [
    {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Today"}]},
    {
      "type": "taskList",
      "content": [
        {
          "type": "taskItem",
          "attrs": {"checked": false},
          "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Plan"}]}]
        }
      ]
    },
    {"type": "paragraph", "content": [
      {"type": "text", "text": "Read "},
      {"type": "text", "text": "docs", "marks": [{"type": "link", "attrs": {"href": "https://tiptap.dev", "target": "_blank"}}]}
    ]}
  ]
}"#;

#[test]
fn test_stored_document_renders_editor_html() {
    let html = EditorFormat::default().parse(STORED_DOCUMENT).unwrap();
    assert_eq!(
        html,
        concat!(
            "<h2>Today</h2>",
            r#"<ul data-type="taskList"><li class="novel-flex novel-items-start novel-my-4" data-checked="false" data-type="taskItem">"#,
            r#"<label><input type="checkbox"><span></span></label><div><p>Plan</p></div></li></ul>"#,
            r#"<p>Read <a href="https://tiptap.dev" target="_blank">docs</a></p>"#
        )
    );
}

#[test]
fn test_unknown_node_type_is_a_parse_error() {
    let result = EditorFormat::default().parse(r#"{"type":"doc","content":[{"type":"youtube"}]}"#);
    assert!(matches!(result, Err(FormatError::ParseError(_))));
}

#[test]
fn test_stored_document_to_markdown() {
    let document: Document = serde_json::from_str(STORED_DOCUMENT).unwrap();
    let html = render_html(&document).unwrap();
    assert_eq!(
        novel_md::html_to_markdown(&html),
        "## Today\n\n- [ ] Plan\n\nRead [docs](https://tiptap.dev)"
    );
}
