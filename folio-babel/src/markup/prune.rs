//! Removal of platform chrome below a content root
//!
//! Scraped content roots are littered with platform widgets: share buttons,
//! hook-tagged overlays, captions duplicated from alt text and tiny social
//! icons. These are stripped before conversion so they never reach the body.

use super::{Element, MarkupNode};

/// What counts as chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeRules {
    /// Attribute marking platform widgets (e.g. `data-hook`). Images carrying
    /// it are kept.
    pub hook_attribute: String,
    /// Tags removed wholesale.
    pub removed_tags: Vec<String>,
    /// Images whose declared width or height is below this are decorative.
    pub min_image_dimension: u32,
    /// Images whose `src` contains any of these fragments are decorative.
    pub skip_src_fragments: Vec<String>,
}

impl Default for ChromeRules {
    fn default() -> Self {
        ChromeRules {
            hook_attribute: "data-hook".to_string(),
            removed_tags: ["button", "figcaption", "script", "style"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            min_image_dimension: 50,
            skip_src_fragments: ["puppet.png", "linkedin", "facebook"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl ChromeRules {
    fn is_chrome(&self, el: &Element) -> bool {
        if el.tag == "img" {
            return self.is_decorative_image(el);
        }
        self.removed_tags.iter().any(|tag| *tag == el.tag)
            || el.attr(&self.hook_attribute).is_some()
    }

    fn is_decorative_image(&self, img: &Element) -> bool {
        // Undeclared dimensions count as large
        let dimension = |name: &str| {
            img.attr(name)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(u32::MAX)
        };
        if dimension("width") < self.min_image_dimension
            || dimension("height") < self.min_image_dimension
        {
            return true;
        }
        let src = img.attr("src").unwrap_or_default();
        self.skip_src_fragments
            .iter()
            .any(|fragment| src.contains(fragment.as_str()))
    }
}

/// Return a copy of `root` with chrome removed from its descendants. The root
/// itself is always kept, even when it carries the hook attribute.
pub fn prune_chrome(root: &Element, rules: &ChromeRules) -> Element {
    Element {
        tag: root.tag.clone(),
        attrs: root.attrs.clone(),
        children: prune_children(&root.children, rules),
    }
}

fn prune_children(children: &[MarkupNode], rules: &ChromeRules) -> Vec<MarkupNode> {
    children
        .iter()
        .filter_map(|node| match node {
            MarkupNode::Text(_) => Some(node.clone()),
            MarkupNode::Element(el) if rules.is_chrome(el) => None,
            MarkupNode::Element(el) => Some(MarkupNode::Element(prune_chrome(el, rules))),
        })
        .collect()
}
