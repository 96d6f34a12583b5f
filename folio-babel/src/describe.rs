//! Description derivation
//!
//! The description field is derived from the converted Markdown body rather
//! than from the source markup, so that chrome pruning and conversion have
//! already happened. The body is parsed back with comrak and its top-level
//! blocks are scanned for text.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

pub const DEFAULT_MAX_LEN: usize = 150;
pub const DEFAULT_MIN_LEN: usize = 20;

/// How to pick the block that becomes the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionStrategy {
    /// First block with any text.
    FirstBlock,
    /// First block whose text is longer than `min_len` characters.
    FirstLongBlock { min_len: usize },
    /// Always the title.
    Title,
}

impl Default for DescriptionStrategy {
    fn default() -> Self {
        DescriptionStrategy::FirstLongBlock {
            min_len: DEFAULT_MIN_LEN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Describer {
    pub strategy: DescriptionStrategy,
    /// Cap in characters.
    pub max_len: usize,
}

impl Default for Describer {
    fn default() -> Self {
        Describer {
            strategy: DescriptionStrategy::default(),
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

impl Describer {
    pub fn new(strategy: DescriptionStrategy, max_len: usize) -> Self {
        Describer { strategy, max_len }
    }

    /// First block of `body` the strategy accepts, capped to `max_len`.
    /// `None` when nothing qualifies or the strategy is `Title`.
    pub fn excerpt(&self, body: &str) -> Option<String> {
        let picked = match self.strategy {
            DescriptionStrategy::Title => None,
            DescriptionStrategy::FirstBlock => text_blocks(body).into_iter().next(),
            DescriptionStrategy::FirstLongBlock { min_len } => text_blocks(body)
                .into_iter()
                .find(|block| block.chars().count() > min_len),
        };
        picked.map(|block| truncate_chars(block.trim(), self.max_len))
    }

    /// Derive a description from a Markdown body, falling back to `title`.
    pub fn describe(&self, body: &str, title: &str) -> String {
        self.excerpt(body).unwrap_or_else(|| self.title(title))
    }

    pub fn title(&self, title: &str) -> String {
        truncate_chars(title.trim(), self.max_len)
    }
}

/// Plain text of every top-level block that can serve as a description.
pub fn text_blocks(body: &str) -> Vec<String> {
    let arena = Arena::new();
    let options = ComrakOptions::default();
    let root = parse_document(&arena, body, &options);

    root.children()
        .filter(|block| is_prose(block))
        .map(|block| {
            let mut text = String::new();
            collect_text(block, &mut text);
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|text| !text.is_empty())
        .collect()
}

fn is_prose<'a>(block: &'a AstNode<'a>) -> bool {
    match &block.data.borrow().value {
        NodeValue::Heading(_)
        | NodeValue::CodeBlock(_)
        | NodeValue::HtmlBlock(_)
        | NodeValue::ThematicBreak => false,
        NodeValue::Paragraph => !is_image_only(block),
        _ => true,
    }
}

fn is_image_only<'a>(paragraph: &'a AstNode<'a>) -> bool {
    paragraph.children().all(|child| match &child.data.borrow().value {
        NodeValue::Image(_) | NodeValue::SoftBreak | NodeValue::LineBreak => true,
        NodeValue::Text(text) => text.trim().is_empty(),
        _ => false,
    })
}

fn collect_text<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        // Alt text is not prose
        NodeValue::Image(_) => {}
        NodeValue::Paragraph | NodeValue::Item(_) => {
            for child in node.children() {
                collect_text(child, output);
            }
            output.push(' ');
        }
        _ => {
            for child in node.children() {
                collect_text(child, output);
            }
        }
    }
}

/// Cut to at most `max` characters, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte, _)) => text[..byte].trim_end().to_string(),
        None => text.to_string(),
    }
}
