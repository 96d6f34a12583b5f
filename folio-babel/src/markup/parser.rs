//! HTML parsing (HTML string → MarkupNode)
//!
//! Pipeline: HTML string → html5ever tree builder → RcDom → owned MarkupNode
//!
//! The HTML5 tree builder repairs malformed markup the same way browsers do,
//! so parsing has no error path: scraped pages with unclosed tags, stray end
//! tags or inline `<style>` soup still produce a tree.
//!
//! Lowering keeps at most [`MAX_DEPTH`] levels of elements. Anything nested
//! deeper is flattened into its text, so every later pass over the owned
//! tree recurses a bounded number of times.

use super::{Element, ElementKind, MarkupNode};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Element nesting kept by [`parse_html`].
pub const MAX_DEPTH: usize = 128;

/// Parse a document or fragment into an owned tree rooted at a synthetic
/// `#document` element.
pub fn parse_html(source: &str) -> MarkupNode {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);

    let mut root = Element::new("#document");
    for child in dom.document.children.borrow().iter() {
        if let Some(node) = lower(child, 1) {
            root.children.push(node);
        }
    }
    MarkupNode::Element(root)
}

/// The `<body>` element of a parsed document, or the root itself.
pub fn body(root: &MarkupNode) -> &Element {
    match root {
        MarkupNode::Element(el) if el.tag == "body" => el,
        MarkupNode::Element(el) => el.find_tag("body").unwrap_or(el),
        MarkupNode::Text(_) => &EMPTY,
    }
}

static EMPTY: Element = Element {
    tag: String::new(),
    attrs: Vec::new(),
    children: Vec::new(),
};

fn lower(handle: &Handle, depth: usize) -> Option<MarkupNode> {
    match &handle.data {
        NodeData::Text { contents } => Some(MarkupNode::Text(contents.borrow().to_string())),

        NodeData::Element { .. } if depth > MAX_DEPTH => Some(MarkupNode::Text(flatten(handle))),

        NodeData::Element { name, attrs, .. } => {
            let mut element = Element::new(&*name.local);
            element.attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            element.children = handle
                .children
                .borrow()
                .iter()
                .filter_map(|child| lower(child, depth + 1))
                .collect();
            Some(MarkupNode::Element(element))
        }

        // Comments, doctypes and processing instructions carry no content
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}

/// Text of a subtree, collected without recursion. Block boundaries become
/// spaces; opaque elements contribute nothing.
fn flatten(handle: &Handle) -> String {
    let mut out = String::new();
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        match &node.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { name, .. } => {
                match ElementKind::from_tag(&name.local) {
                    ElementKind::Opaque => continue,
                    ElementKind::Strong
                    | ElementKind::Emphasis
                    | ElementKind::Link
                    | ElementKind::InlineCode
                    | ElementKind::InlineWrapper => {}
                    _ => out.push(' '),
                }
                stack.extend(node.children.borrow().iter().rev().cloned());
            }
            _ => {}
        }
    }
    out
}
