//! Editor import (HTML → editor document)
//!
//! Builds the document tree the Novel editor would produce when loading HTML.
//! Pipeline: HTML string → RcDom → Flow → Document
//!
//! Parsing is lenient: anything outside the editor vocabulary is either
//! dropped (scripts, form controls) or unwrapped so its text survives.

use super::nodes::{
    CodeBlockAttrs, Document, HeadingAttrs, ImageAttrs, LinkAttrs, Mark, Node, OrderedListAttrs,
    TaskItemAttrs,
};
use crate::dom::{self, Attributes};
use crate::task::{self, CHECKED_ATTR, TASK_ITEM_TYPE, TASK_LIST_TYPE};
use markup5ever_rcdom::{Handle, NodeData};

const DEFAULT_LINK_TARGET: &str = "_blank";
const DEFAULT_LINK_REL: &str = "noopener noreferrer nofollow";

/// Convert HTML into an editor document
///
/// An input without any content yields a document holding one empty paragraph.
pub fn html_to_document(html: &str) -> Document {
    let dom = dom::parse_html(html);
    let mut content = match dom::body(&dom) {
        Some(body) => block_children(&body, &[]),
        None => Vec::new(),
    };
    if content.is_empty() {
        content.push(Node::paragraph(Vec::new()));
    }

    let document = Document::new(content);
    tracing::trace!(?document, "parsed editor document");
    document
}

/// Blocks under construction plus the inline run not yet wrapped in a paragraph
#[derive(Debug, Default)]
struct Flow {
    blocks: Vec<Node>,
    inline: Vec<Node>,
}

impl Flow {
    fn push_block(&mut self, node: Node) {
        self.flush();
        self.blocks.push(node);
    }

    fn push_inline(&mut self, node: Node) {
        self.inline.push(node);
    }

    fn push_text(&mut self, raw: &str, marks: &[Mark]) {
        let collapsed = dom::collapse_whitespace(raw);
        let text = if self.at_run_start() {
            collapsed.trim_start()
        } else {
            collapsed.as_str()
        };
        if text.is_empty() {
            return;
        }

        let marks = canonical_marks(marks);
        if let Some(Node::Text {
            text: previous,
            marks: previous_marks,
        }) = self.inline.last_mut()
        {
            if *previous_marks == marks {
                previous.push_str(text);
                return;
            }
        }
        self.inline.push(Node::marked_text(text, marks));
    }

    /// Whether leading whitespace of the next text is insignificant
    fn at_run_start(&self) -> bool {
        match self.inline.last() {
            None | Some(Node::HardBreak) => true,
            Some(Node::Text { text, .. }) => text.ends_with(' '),
            Some(_) => false,
        }
    }

    /// Close the inline run into a paragraph
    fn flush(&mut self) {
        let inline = finish_inline(std::mem::take(&mut self.inline));
        if !inline.is_empty() {
            self.blocks.push(Node::paragraph(inline));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush();
        self.blocks
    }
}

/// Trim the run's trailing whitespace; a whitespace-only run becomes empty
fn finish_inline(mut inline: Vec<Node>) -> Vec<Node> {
    while let Some(Node::Text { text, .. }) = inline.last_mut() {
        let trimmed = text.trim_end().len();
        text.truncate(trimmed);
        if !text.is_empty() {
            break;
        }
        inline.pop();
    }
    inline
}

/// Marks in editor order; `code` excludes every other mark
fn canonical_marks(marks: &[Mark]) -> Vec<Mark> {
    if marks.contains(&Mark::Code) {
        return vec![Mark::Code];
    }
    let mut marks = marks.to_vec();
    marks.sort();
    marks.dedup();
    marks
}

fn block_children(node: &Handle, marks: &[Mark]) -> Vec<Node> {
    let mut flow = Flow::default();
    visit_children(node, &mut flow, marks);
    flow.finish()
}

/// Children of a textblock (heading) as inline nodes, blocks split out after it
fn inline_children(node: &Handle, marks: &[Mark]) -> (Vec<Node>, Vec<Node>) {
    let mut inline = Vec::new();
    let mut rest = Vec::new();
    for block in block_children(node, marks) {
        match block {
            Node::Paragraph { content } if rest.is_empty() => inline.extend(content),
            other => rest.push(other),
        }
    }
    (inline, rest)
}

fn visit_children(node: &Handle, flow: &mut Flow, marks: &[Mark]) {
    for child in node.children.borrow().iter() {
        visit(child, flow, marks);
    }
}

fn visit(node: &Handle, flow: &mut Flow, marks: &[Mark]) {
    match &node.data {
        NodeData::Text { contents } => flow.push_text(&contents.borrow(), marks),
        NodeData::Element { name, .. } => element(node, &name.local, flow, marks),
        _ => {}
    }
}

fn element(node: &Handle, tag: &str, flow: &mut Flow, marks: &[Mark]) {
    let attrs = Attributes::of(node).unwrap_or_default();
    match tag {
        "head" | "script" | "style" | "noscript" | "template" | "input" | "button" | "select"
        | "textarea" | "iframe" | "object" | "svg" => {}

        "p" => {
            let blocks = block_children(node, marks);
            if blocks.is_empty() {
                flow.push_block(Node::paragraph(Vec::new()));
            }
            for block in blocks {
                flow.push_block(block);
            }
        }

        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse().unwrap_or(1);
            let (content, rest) = inline_children(node, marks);
            flow.push_block(Node::Heading {
                attrs: HeadingAttrs { level },
                content,
            });
            for block in rest {
                flow.push_block(block);
            }
        }

        "blockquote" => {
            let mut content = block_children(node, marks);
            if content.is_empty() {
                content.push(Node::paragraph(Vec::new()));
            }
            flow.push_block(Node::Blockquote { content });
        }

        "ul" if is_task_list(node, &attrs) => {
            let content = list_items(node, marks, true);
            flow.push_block(Node::TaskList { content });
        }
        "ul" => {
            let content = list_items(node, marks, false);
            flow.push_block(Node::BulletList { content });
        }
        "ol" => {
            let start = attrs
                .get("start")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(1);
            let content = list_items(node, marks, false);
            flow.push_block(Node::OrderedList {
                attrs: OrderedListAttrs { start },
                content,
            });
        }

        "pre" => flow.push_block(code_block(node, &attrs)),
        "hr" => flow.push_block(Node::HorizontalRule),
        "br" => flow.push_inline(Node::HardBreak),

        "img" => {
            if let Some(src) = attrs.get("src").filter(|src| !src.trim().is_empty()) {
                flow.push_block(Node::Image {
                    attrs: ImageAttrs {
                        src: src.to_string(),
                        alt: attrs.get("alt").map(str::to_string),
                        title: attrs.get("title").map(str::to_string),
                    },
                });
            }
        }

        "a" => match attrs.get("href").filter(|href| !href.trim().is_empty()) {
            Some(href) => {
                let link = Mark::Link {
                    attrs: LinkAttrs {
                        href: href.to_string(),
                        target: Some(attrs.get("target").unwrap_or(DEFAULT_LINK_TARGET).to_string()),
                        rel: Some(attrs.get("rel").unwrap_or(DEFAULT_LINK_REL).to_string()),
                        class: attrs.get("class").map(str::to_string),
                    },
                };
                visit_children(node, flow, &with_mark(marks, link));
            }
            None => visit_children(node, flow, marks),
        },

        "strong" | "b" => visit_children(node, flow, &with_mark(marks, Mark::Bold)),
        "em" | "i" => visit_children(node, flow, &with_mark(marks, Mark::Italic)),
        "s" | "del" | "strike" => visit_children(node, flow, &with_mark(marks, Mark::Strike)),
        "code" => visit_children(node, flow, &with_mark(marks, Mark::Code)),

        "div" | "section" | "article" | "header" | "footer" | "main" | "nav" | "aside"
        | "figure" | "figcaption" | "details" | "summary" | "address" | "li" | "table"
        | "thead" | "tbody" | "tfoot" | "tr" | "dl" | "dt" | "dd" => {
            flow.flush();
            visit_children(node, flow, marks);
            flow.flush();
        }

        _ => visit_children(node, flow, marks),
    }
}

fn with_mark(marks: &[Mark], mark: Mark) -> Vec<Mark> {
    let mut marks = marks.to_vec();
    marks.push(mark);
    marks
}

fn is_task_item(node: &Handle) -> bool {
    if dom::tag_name(node).as_deref() != Some("li") {
        return false;
    }
    let attrs = Attributes::of(node).unwrap_or_default();
    attrs.get("data-type") == Some(TASK_ITEM_TYPE) || task::task_item_state(&attrs).is_some()
}

fn is_task_list(node: &Handle, attrs: &Attributes) -> bool {
    if attrs.get("data-type") == Some(TASK_LIST_TYPE) {
        return true;
    }
    let children = dom::element_children(node);
    !children.is_empty() && children.iter().all(is_task_item)
}

fn list_items(node: &Handle, marks: &[Mark], task_list: bool) -> Vec<Node> {
    dom::element_children(node)
        .iter()
        .map(|child| {
            let mut content = block_children(child, marks);
            if !matches!(content.first(), Some(Node::Paragraph { .. })) {
                content.insert(0, Node::paragraph(Vec::new()));
            }
            if task_list {
                let checked = Attributes::of(child)
                    .and_then(|attrs| attrs.get(CHECKED_ATTR).map(|v| v == "true"))
                    .unwrap_or(false);
                Node::TaskItem {
                    attrs: TaskItemAttrs { checked },
                    content,
                }
            } else {
                Node::ListItem { content }
            }
        })
        .collect()
}

fn code_block(node: &Handle, attrs: &Attributes) -> Node {
    let language = dom::element_children(node)
        .iter()
        .filter(|child| dom::tag_name(child).as_deref() == Some("code"))
        .filter_map(Attributes::of)
        .chain(std::iter::once(attrs.clone()))
        .find_map(|attrs| code_language(&attrs));

    let text = dom::text_content(node);
    let content = if text.is_empty() {
        Vec::new()
    } else {
        vec![Node::text(text)]
    };
    Node::CodeBlock {
        attrs: CodeBlockAttrs { language },
        content,
    }
}

fn code_language(attrs: &Attributes) -> Option<String> {
    attrs
        .get("class")?
        .split_whitespace()
        .find_map(|class| class.strip_prefix("language-"))
        .map(str::to_string)
}
