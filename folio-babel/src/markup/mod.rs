//! Source markup tree
//!
//! Scraped pages are parsed once with `html5ever` (see [`parser`]) and lowered
//! into the owned [`MarkupNode`] tree defined here. Everything downstream
//! (pruning, metadata extraction, conversion) works on this tree, so the
//! reference-counted DOM never leaves the parser module.
//!
//! The tree is small: element nodes carry a lower-cased tag
//! name, their attributes in source order and their children; text nodes
//! carry raw text. Comments, doctypes and processing instructions are dropped
//! during lowering.

pub mod kind;
pub mod parser;
pub mod prune;

pub use kind::ElementKind;
pub use parser::{body, parse_html};
pub use prune::{prune_chrome, ChromeRules};

/// An element or text node in the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element(Element),
    Text(String),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: MarkupNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(MarkupNode::Text(text.into()))
    }

    /// Value of the first attribute with this name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether any class token contains `fragment` (e.g. `grid-` matches
    /// `image-grid grid-2-col`).
    pub fn has_class_fragment(&self, fragment: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c.contains(fragment)))
            .unwrap_or(false)
    }

    pub fn kind(&self) -> ElementKind {
        ElementKind::from_tag(&self.tag)
    }

    /// Direct element children, skipping text.
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(MarkupNode::as_element)
    }

    /// Concatenated text of every descendant text node, untrimmed.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Depth-first, pre-order search over descendants (not `self`).
    pub fn find<P>(&self, predicate: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool + Copy,
    {
        for child in self.element_children() {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// All matching descendants in document order.
    pub fn find_all<P>(&self, predicate: P) -> Vec<&Element>
    where
        P: Fn(&Element) -> bool + Copy,
    {
        let mut found = Vec::new();
        collect_matching(self, predicate, &mut found);
        found
    }

    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&Element> {
        self.find(|el| el.attr(name) == Some(value))
    }

    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        self.find(|el| el.tag == tag)
    }
}

impl MarkupNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(el) => Some(el),
            MarkupNode::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            MarkupNode::Element(el) => el.text_content(),
            MarkupNode::Text(text) => text.clone(),
        }
    }
}

impl From<Element> for MarkupNode {
    fn from(el: Element) -> Self {
        MarkupNode::Element(el)
    }
}

fn collect_text(nodes: &[MarkupNode], out: &mut String) {
    for node in nodes {
        match node {
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Element(el) => collect_text(&el.children, out),
        }
    }
}

fn collect_matching<'a, P>(el: &'a Element, predicate: P, out: &mut Vec<&'a Element>)
where
    P: Fn(&Element) -> bool + Copy,
{
    for child in el.element_children() {
        if predicate(child) {
            out.push(child);
        }
        collect_matching(child, predicate, out);
    }
}
