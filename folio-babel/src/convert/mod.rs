//! HTML → Markdown document conversion
//!
//! Pipeline: MarkupNode tree → depth-first walk → MarkdownWriter → normalized body
//!
//! # Element Mapping Table
//!
//! | Element kind         | Emission                                                  |
//! |----------------------|-----------------------------------------------------------|
//! | `h1`..`h6`           | blank line, `#` × level + space, content, blank line      |
//! | `p`                  | blank line, content, blank line                           |
//! | `br`                 | hard line break (two spaces + newline)                    |
//! | `strong`, `b`        | `**content**`                                             |
//! | `em`, `i`            | `*content*`                                               |
//! | `a`                  | `[content](href)`, missing `href` → `#`                   |
//! | `img`                | standalone block `![alt](resolved src)`                   |
//! | `ul`                 | one `- ` line per direct `li` child                       |
//! | `ol`                 | one `N. ` line per direct `li` child, N counts `li` only  |
//! | `blockquote`         | rendered content with every line prefixed `> `           |
//! | `code`               | raw text content in backticks                             |
//! | `pre`                | raw text content in a fenced block                        |
//! | grid container       | blank lines around content (when grid detection is on)   |
//! | `script`, `style`, … | nothing                                                   |
//! | anything else        | content only, no delimiters                               |
//!
//! Unknown wrappers never block traversal: wrapping content in an
//! unrecognized element yields exactly the output of the bare content.
//!
//! # Failure Behavior
//!
//! Conversion has no error path. Missing attributes, empty elements and
//! empty trees degrade to empty output for that subtree; an image whose
//! `src` is not in the reference table keeps its original `src` and is
//! reported in [`ConversionResult::unresolved`] so the caller can log it.
//!
//! # Determinism
//!
//! `convert` is a pure function of the tree and the table: no I/O, no clock,
//! no global state. The same inputs always produce byte-identical output.

pub mod writer;

use crate::describe::Describer;
use crate::images::{AssetPattern, ImageRefTable, ImageReference};
use crate::markup::{Element, ElementKind, MarkupNode};
use writer::MarkdownWriter;

/// Behavioral switches that used to be forks of the converter.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterOptions {
    /// Treat containers whose class contains `grid_class_marker` as blocks.
    pub detect_image_grids: bool,
    pub grid_class_marker: String,
    /// Prefix joined to a resolved local file name, e.g. `/images/`.
    pub image_prefix: String,
    pub asset_pattern: AssetPattern,
    /// Picks [`ConversionResult::excerpt`] from the finished body.
    pub describer: Describer,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        ConverterOptions {
            detect_image_grids: true,
            grid_class_marker: "grid-".to_string(),
            image_prefix: "/images/".to_string(),
            asset_pattern: AssetPattern::default(),
            describer: Describer::default(),
        }
    }
}

/// Output of one conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionResult {
    /// Markdown body, trimmed, with at most one blank line between blocks.
    pub body: String,
    /// First prose block of the body, length-capped. Used as the record
    /// description unless the title stands in.
    pub excerpt: Option<String>,
    /// Resolved image references in emission order.
    pub images: Vec<ImageReference>,
    /// Original `src` of every image that missed the table.
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentConverter {
    options: ConverterOptions,
}

impl DocumentConverter {
    pub fn new(options: ConverterOptions) -> Self {
        DocumentConverter { options }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Convert the subtree rooted at `root`.
    pub fn convert(&self, root: &MarkupNode, refs: &ImageRefTable) -> ConversionResult {
        let mut walk = Walk::new(&self.options, refs);
        walk.node(root);
        self.finish(walk)
    }

    /// Convenience wrapper for an element root.
    pub fn convert_element(&self, root: &Element, refs: &ImageRefTable) -> ConversionResult {
        let mut walk = Walk::new(&self.options, refs);
        walk.element(root);
        self.finish(walk)
    }

    fn finish(&self, walk: Walk<'_>) -> ConversionResult {
        let body = walk.writer.finish();
        ConversionResult {
            excerpt: self.options.describer.excerpt(&body),
            body,
            images: walk.images,
            unresolved: walk.unresolved,
        }
    }
}

struct Walk<'a> {
    options: &'a ConverterOptions,
    refs: &'a ImageRefTable,
    writer: MarkdownWriter,
    images: Vec<ImageReference>,
    unresolved: Vec<String>,
}

impl<'a> Walk<'a> {
    fn new(options: &'a ConverterOptions, refs: &'a ImageRefTable) -> Self {
        Walk {
            options,
            refs,
            writer: MarkdownWriter::new(),
            images: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    fn node(&mut self, node: &MarkupNode) {
        match node {
            MarkupNode::Text(text) => self.writer.text(text),
            MarkupNode::Element(el) => self.element(el),
        }
    }

    fn children(&mut self, el: &Element) {
        for child in &el.children {
            self.node(child);
        }
    }

    fn element(&mut self, el: &Element) {
        match el.kind() {
            ElementKind::Heading(level) => {
                self.writer.block_break();
                self.writer.raw(&format!("{} ", "#".repeat(level as usize)));
                self.children(el);
                self.writer.block_break();
            }

            ElementKind::Paragraph => {
                self.writer.block_break();
                self.children(el);
                self.writer.block_break();
            }

            ElementKind::LineBreak => self.writer.hard_break(),

            ElementKind::Strong => self.wrap(el, "**", "**"),

            ElementKind::Emphasis => self.wrap(el, "*", "*"),

            ElementKind::Link => {
                let href = el.attr("href").filter(|h| !h.trim().is_empty()).unwrap_or("#");
                self.wrap(el, "[", &format!("]({})", href.trim()));
            }

            ElementKind::Image => self.image(el),

            ElementKind::UnorderedList => self.list(el, |_| "- ".to_string()),

            ElementKind::OrderedList => self.list(el, |position| format!("{position}. ")),

            ElementKind::Blockquote => {
                let quoted = self.nested(el);
                if quoted.is_empty() {
                    return;
                }
                self.writer.block_break();
                let lines: Vec<String> = quoted
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect();
                self.writer.raw(&lines.join("\n"));
                self.writer.block_break();
            }

            ElementKind::InlineCode => {
                // Line endings inside a code span are spaces
                let code = el.text_content().replace('\n', " ");
                if code.trim().is_empty() {
                    return;
                }
                let fence = if code.contains('`') { "``" } else { "`" };
                let padded = if code.contains('`') {
                    format!(" {code} ")
                } else {
                    code
                };
                self.writer.inline(&format!("{fence}{padded}{fence}"));
            }

            ElementKind::Preformatted => {
                let code = el.text_content();
                self.writer.block_break();
                self.writer.raw("```\n");
                self.writer.raw(code.trim_end_matches('\n'));
                self.writer.raw("\n```");
                self.writer.block_break();
            }

            ElementKind::Container => {
                let grid = self.options.detect_image_grids
                    && el.has_class_fragment(&self.options.grid_class_marker);
                if grid {
                    self.writer.block_break();
                    self.children(el);
                    self.writer.block_break();
                } else {
                    self.children(el);
                }
            }

            ElementKind::Opaque => {}

            // Stray list items, inline wrappers and unknown tags unwrap
            ElementKind::ListItem | ElementKind::InlineWrapper | ElementKind::Unknown => {
                self.children(el)
            }
        }
    }

    /// Surround content with inline markers; empty content emits nothing but
    /// still visits children (e.g. a link wrapping an image).
    fn wrap(&mut self, el: &Element, open: &str, close: &str) {
        if el.text_content().trim().is_empty() {
            self.children(el);
            return;
        }
        self.writer.open_inline(open);
        self.children(el);
        self.writer.close_inline(close);
    }

    fn image(&mut self, el: &Element) {
        let src = match el.attr("src").map(str::trim) {
            Some(src) if !src.is_empty() => src,
            _ => return,
        };

        let resolved = self.refs.resolve(src, &self.options.asset_pattern);
        let url = match resolved {
            Some(reference) => {
                self.images.push(reference.clone());
                format!("{}{}", self.options.image_prefix, reference.local)
            }
            None => {
                self.unresolved.push(src.to_string());
                src.to_string()
            }
        };

        let alt = el
            .attr("alt")
            .filter(|a| !a.trim().is_empty())
            .or_else(|| resolved.and_then(|r| r.alt.as_deref()))
            .unwrap_or_default();
        let alt = alt.split_whitespace().collect::<Vec<_>>().join(" ");

        self.writer.block_break();
        self.writer.inline(&format!("![{alt}]({url})"));
        self.writer.block_break();
    }

    fn list<F>(&mut self, el: &Element, marker: F)
    where
        F: Fn(usize) -> String,
    {
        let items: Vec<&Element> = el
            .element_children()
            .filter(|child| child.kind() == ElementKind::ListItem)
            .collect();
        if items.is_empty() {
            return;
        }

        self.writer.block_break();
        for (index, item) in items.into_iter().enumerate() {
            let marker = marker(index + 1);
            let indent = " ".repeat(marker.chars().count());
            let content = self.nested(item);

            let mut lines = content.lines();
            self.writer.raw(&marker);
            self.writer.raw(lines.next().unwrap_or_default());
            for line in lines {
                self.writer.newline();
                if !line.is_empty() {
                    self.writer.raw(&indent);
                    self.writer.raw(line);
                }
            }
            self.writer.newline();
        }
        self.writer.block_break();
    }

    /// Render an element's children into a fresh buffer and return the
    /// normalized text. Images found inside still count for this document.
    fn nested(&mut self, el: &Element) -> String {
        let outer = std::mem::take(&mut self.writer);
        self.children(el);
        let inner = std::mem::replace(&mut self.writer, outer);
        inner.finish()
    }
}
