//! HTML DOM access shared by the converters
//!
//! Parsing is delegated to `html5ever`, which recovers from malformed markup the
//! way browsers do, so none of these helpers can fail. Attribute access goes
//! through [`Attributes`], a typed snapshot of an element's attribute set.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, LocalName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::collections::BTreeMap;

/// Parse an HTML string (document or fragment) into an rcdom tree
pub fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// Locate the `<body>` element html5ever synthesizes for every document
pub fn body(dom: &RcDom) -> Option<Handle> {
    let html = find_child(&dom.document, "html")?;
    find_child(&html, "body")
}

fn find_child(node: &Handle, tag: &str) -> Option<Handle> {
    node.children
        .borrow()
        .iter()
        .find(|child| tag_name(child).is_some_and(|name| &*name == tag))
        .cloned()
}

/// Local tag name of an element node, `None` for text, comments, etc.
pub fn tag_name(node: &Handle) -> Option<LocalName> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.clone()),
        _ => None,
    }
}

/// Concatenated text of all descendant text nodes
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Collapse every run of ASCII whitespace to a single space
pub fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space = false;
    for c in raw.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Element children of a node, skipping text and comments
pub fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// Snapshot of an element's attributes, keyed by local attribute name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Read the attributes of `node`; `None` when the node is not an element
    pub fn of(node: &Handle) -> Option<Self> {
        match &node.data {
            NodeData::Element { attrs, .. } => Some(Attributes(
                attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Attributes(iter.into_iter().collect())
    }
}
