//! Editor export (editor document → HTML)
//!
//! Renders a stored editor document back to the HTML the editor itself would
//! produce. The tree is built as rcdom nodes and written by html5ever's
//! serializer, which takes care of escaping.

use super::nodes::{Document, Mark, Node};
use crate::error::FormatError;
use crate::task::{CHECKED_ATTR, TASK_ITEM_CLASS, TASK_ITEM_TYPE, TASK_LIST_TYPE};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node as DomNode, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Render an editor document to HTML
pub fn render_html(document: &Document) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for node in &document.content {
        let serializable = SerializableHandle::from(build(node));
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

fn build(node: &Node) -> Handle {
    match node {
        Node::Paragraph { content } => container("p", Vec::new(), content),
        Node::Heading { attrs, content } => {
            let tag = format!("h{}", attrs.level.clamp(1, 6));
            container(&tag, Vec::new(), content)
        }
        Node::Blockquote { content } => container("blockquote", Vec::new(), content),
        Node::BulletList { content } => container("ul", Vec::new(), content),
        Node::OrderedList { attrs, content } => {
            let mut list_attrs = Vec::new();
            if attrs.start != 1 {
                list_attrs.push(("start", attrs.start.to_string()));
            }
            container("ol", list_attrs, content)
        }
        Node::ListItem { content } => container("li", Vec::new(), content),
        Node::TaskList { content } => container(
            "ul",
            vec![("data-type", TASK_LIST_TYPE.to_string())],
            content,
        ),
        Node::TaskItem { attrs, content } => task_item(attrs.checked, content),
        Node::CodeBlock { attrs, content } => {
            let code_attrs = attrs
                .language
                .as_ref()
                .map(|language| vec![("class", format!("language-{language}"))])
                .unwrap_or_default();
            let code = container("code", code_attrs, content);
            let pre = create_element("pre", Vec::new());
            pre.children.borrow_mut().push(code);
            pre
        }
        Node::HorizontalRule => create_element("hr", Vec::new()),
        Node::HardBreak => create_element("br", Vec::new()),
        Node::Image { attrs } => {
            let mut img_attrs = vec![("src", attrs.src.clone())];
            if let Some(alt) = &attrs.alt {
                img_attrs.push(("alt", alt.clone()));
            }
            if let Some(title) = &attrs.title {
                img_attrs.push(("title", title.clone()));
            }
            create_element("img", img_attrs)
        }
        Node::Text { text, marks } => marked_text(text, marks),
    }
}

fn container(tag: &str, attrs: Vec<(&str, String)>, content: &[Node]) -> Handle {
    let element = create_element(tag, attrs);
    for child in content {
        element.children.borrow_mut().push(build(child));
    }
    element
}

/// `<li>` in the shape the editor renders for a task item
fn task_item(checked: bool, content: &[Node]) -> Handle {
    let mut input_attrs = vec![("type", "checkbox".to_string())];
    if checked {
        input_attrs.push(("checked", "checked".to_string()));
    }
    let label = create_element("label", Vec::new());
    label
        .children
        .borrow_mut()
        .extend([create_element("input", input_attrs), create_element("span", Vec::new())]);

    let item = create_element(
        "li",
        vec![
            ("class", TASK_ITEM_CLASS.to_string()),
            (CHECKED_ATTR, checked.to_string()),
            ("data-type", TASK_ITEM_TYPE.to_string()),
        ],
    );
    item.children
        .borrow_mut()
        .extend([label, container("div", Vec::new(), content)]);
    item
}

/// Text wrapped in one element per mark, first mark outermost
fn marked_text(text: &str, marks: &[Mark]) -> Handle {
    marks.iter().rev().fold(create_text(text), |inner, mark| {
        let wrapper = match mark {
            Mark::Link { attrs } => {
                let mut link_attrs = vec![("href", attrs.href.clone())];
                for (name, value) in [
                    ("target", &attrs.target),
                    ("rel", &attrs.rel),
                    ("class", &attrs.class),
                ] {
                    if let Some(value) = value {
                        link_attrs.push((name, value.clone()));
                    }
                }
                create_element("a", link_attrs)
            }
            Mark::Bold => create_element("strong", Vec::new()),
            Mark::Code => create_element("code", Vec::new()),
            Mark::Italic => create_element("em", Vec::new()),
            Mark::Strike => create_element("s", Vec::new()),
        };
        wrapper.children.borrow_mut().push(inner);
        wrapper
    })
}

fn create_element(tag: &str, attrs: Vec<(&str, String)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        })
        .collect();

    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}
