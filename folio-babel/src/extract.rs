//! Page metadata extraction
//!
//! Blog pages mark their metadata widgets with a platform hook attribute
//! (`data-hook="post-title"` and friends). [`PageFacts::extract`] pulls
//! those out of the parsed tree, and scans the raw HTML for the engagement
//! counters, which the platform renders as `<n> <label>` text.

use crate::markup::{Element, MarkupNode};
use crate::record::Counters;
use regex::Regex;

/// Which hooks and labels identify the metadata of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractProfile {
    pub hook_attribute: String,
    pub title_hook: String,
    pub date_hook: String,
    pub author_hook: String,
    pub reading_time_hook: String,
    pub content_hook: String,
    pub views: CounterPattern,
    pub comments: CounterPattern,
    pub likes: CounterPattern,
}

/// `<n> <label>` counter, compiled once per profile.
#[derive(Debug, Clone)]
pub struct CounterPattern {
    label: String,
    regex: Option<Regex>,
}

impl CounterPattern {
    /// An empty label never matches.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let regex = if label.is_empty() {
            None
        } else {
            Regex::new(&format!(r"(\d+)\s*{}", regex::escape(&label))).ok()
        };
        CounterPattern { label, regex }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// First count in `html`, or 0.
    pub fn count(&self, html: &str) -> u32 {
        self.regex
            .as_ref()
            .and_then(|re| re.captures(html))
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(0)
    }
}

impl PartialEq for CounterPattern {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for CounterPattern {}

impl Default for ExtractProfile {
    fn default() -> Self {
        ExtractProfile {
            hook_attribute: "data-hook".to_string(),
            title_hook: "post-title".to_string(),
            date_hook: "time-ago".to_string(),
            author_hook: "user-name".to_string(),
            reading_time_hook: "time-to-read".to_string(),
            content_hook: "post-description".to_string(),
            views: CounterPattern::new("צפיות"),
            comments: CounterPattern::new("תגובות"),
            likes: CounterPattern::new("לייקים"),
        }
    }
}

impl ExtractProfile {
    fn hooked<'a>(&self, root: &'a Element, hook: &str) -> Option<&'a Element> {
        root.find_by_attr(&self.hook_attribute, hook)
    }
}

/// Metadata found on one page. Everything is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFacts<'a> {
    pub title: Option<String>,
    /// Raw display text of the date, e.g. `12 במרץ 2023`.
    pub date_text: Option<String>,
    pub author: Option<String>,
    pub reading_time: Option<String>,
    pub counters: Counters,
    pub content: Option<&'a Element>,
}

impl<'a> PageFacts<'a> {
    pub fn extract(html: &str, document: &'a MarkupNode, profile: &ExtractProfile) -> Self {
        let root = match document {
            MarkupNode::Element(el) => el,
            MarkupNode::Text(_) => {
                return PageFacts {
                    title: None,
                    date_text: None,
                    author: None,
                    reading_time: None,
                    counters: Counters::default(),
                    content: None,
                }
            }
        };

        let text_of = |hook: &str| {
            profile
                .hooked(root, hook)
                .map(|el| collapse(&el.text_content()))
                .filter(|t| !t.is_empty())
        };

        let date_text = profile.hooked(root, &profile.date_hook).and_then(|el| {
            let text = collapse(&el.text_content());
            if text.is_empty() {
                el.attr("title").map(collapse).filter(|t| !t.is_empty())
            } else {
                Some(text)
            }
        });

        PageFacts {
            title: text_of(&profile.title_hook),
            date_text,
            author: text_of(&profile.author_hook),
            reading_time: text_of(&profile.reading_time_hook),
            counters: Counters {
                views: profile.views.count(html),
                comments: profile.comments.count(html),
                likes: profile.likes.count(html),
            },
            content: profile.hooked(root, &profile.content_hook),
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
