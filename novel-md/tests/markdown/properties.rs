//! Property-based tests for the Markdown converters

use novel_md::task::render_task_item;
use novel_md::{html_to_document, html_to_markdown, is_whitespace_only, markdown_to_html, Node};
use proptest::prelude::*;

/// Short lowercase phrases that need no Markdown escaping
fn phrase_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,3}"
}

fn checked_states(doc: &novel_md::Document) -> Vec<bool> {
    doc.content
        .iter()
        .filter(|node| matches!(node, Node::TaskList { .. }))
        .flat_map(Node::children)
        .filter_map(|item| match item {
            Node::TaskItem { attrs, .. } => Some(attrs.checked),
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn whitespace_only_agrees_with_trim(s in "\\PC{0,20}|[ \\t\\r\\n]{0,10}") {
        prop_assert_eq!(is_whitespace_only(&s), s.trim().is_empty());
    }

    #[test]
    fn markdown_output_has_no_empty_paragraphs(md in "((- \\[[ x]\\] )?[a-z ]{0,12}\n{0,2}){0,6}") {
        prop_assert!(!markdown_to_html(&md).contains("<p></p>"));
    }

    #[test]
    fn checked_state_survives_markdown(items in prop::collection::vec((any::<bool>(), phrase_strategy()), 1..6)) {
        let html = format!(
            "<ul>{}</ul>",
            items
                .iter()
                .map(|(checked, text)| render_task_item(*checked, &format!("<p>{text}</p>")))
                .collect::<String>()
        );

        let md = html_to_markdown(&html);
        prop_assert_eq!(md.lines().count(), items.len());
        for (line, (checked, text)) in md.lines().zip(&items) {
            let marker = if *checked { "[x]" } else { "[ ]" };
            prop_assert_eq!(line, format!("- {marker} {text}"));
        }

        let doc = html_to_document(&markdown_to_html(&md));
        let expected: Vec<bool> = items.iter().map(|(checked, _)| *checked).collect();
        prop_assert_eq!(checked_states(&doc), expected);
    }
}
