//! Closed classification of element tags
//!
//! The converter dispatches on [`ElementKind`] with an exhaustive `match`, so
//! adding a kind forces every emitter to decide what to do with it.

/// Supported element kinds, plus catch-alls for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `h1`..`h6`
    Heading(u8),
    Paragraph,
    LineBreak,
    /// `strong`, `b`
    Strong,
    /// `em`, `i`
    Emphasis,
    Link,
    Image,
    UnorderedList,
    OrderedList,
    ListItem,
    Blockquote,
    InlineCode,
    Preformatted,
    /// `div`-like block containers (`div`, `section`, `article`, `main`, ...)
    Container,
    /// `span`-like inline wrappers
    InlineWrapper,
    /// Elements whose text is never content (`script`, `style`, ...)
    Opaque,
    /// Anything not listed above; traversed transparently
    Unknown,
}

impl ElementKind {
    /// Classify a lower-cased tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => ElementKind::Heading(1),
            "h2" => ElementKind::Heading(2),
            "h3" => ElementKind::Heading(3),
            "h4" => ElementKind::Heading(4),
            "h5" => ElementKind::Heading(5),
            "h6" => ElementKind::Heading(6),
            "p" => ElementKind::Paragraph,
            "br" => ElementKind::LineBreak,
            "strong" | "b" => ElementKind::Strong,
            "em" | "i" => ElementKind::Emphasis,
            "a" => ElementKind::Link,
            "img" => ElementKind::Image,
            "ul" => ElementKind::UnorderedList,
            "ol" => ElementKind::OrderedList,
            "li" => ElementKind::ListItem,
            "blockquote" => ElementKind::Blockquote,
            "code" => ElementKind::InlineCode,
            "pre" => ElementKind::Preformatted,
            "div" | "section" | "article" | "main" | "header" | "footer" | "aside" | "nav"
            | "figure" => ElementKind::Container,
            "span" | "font" | "small" | "u" | "mark" => ElementKind::InlineWrapper,
            "script" | "style" | "noscript" | "template" | "head" => ElementKind::Opaque,
            _ => ElementKind::Unknown,
        }
    }
}
