//! Persisted content records
//!
//! A [`DocumentRecord`] is one blog post, static page or artwork entry. It is
//! built once per batch run and written wholesale; reruns overwrite it.
//! Each kind has its own front-matter key set (see [`DocumentRecord::front_matter`]).

pub mod frontmatter;

pub use frontmatter::{FrontMatter, FrontValue};

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    BlogPost,
    Page,
    Artwork,
}

impl RecordKind {
    /// Content directory the site generator reads this kind from.
    pub fn directory(self) -> &'static str {
        match self {
            RecordKind::BlogPost => "blog",
            RecordKind::Page => "pages",
            RecordKind::Artwork => "artworks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkCategory {
    Color,
    Bw,
    Sculptures,
    Portraits,
    Postcards,
}

impl ArtworkCategory {
    pub const ALL: [ArtworkCategory; 5] = [
        ArtworkCategory::Color,
        ArtworkCategory::Bw,
        ArtworkCategory::Sculptures,
        ArtworkCategory::Portraits,
        ArtworkCategory::Postcards,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArtworkCategory::Color => "color",
            ArtworkCategory::Bw => "bw",
            ArtworkCategory::Sculptures => "sculptures",
            ArtworkCategory::Portraits => "portraits",
            ArtworkCategory::Postcards => "postcards",
        }
    }
}

impl fmt::Display for ArtworkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtworkCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArtworkCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown artwork category '{s}'"))
    }
}

/// Gallery layout hint for a post's images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayout {
    Single,
    TwoCol,
    ThreeCol,
    TwoByTwo,
    ThreeByTwo,
    Other,
}

impl ImageLayout {
    pub fn from_count(count: usize) -> Self {
        match count {
            1 => ImageLayout::Single,
            2 => ImageLayout::TwoCol,
            3 => ImageLayout::ThreeCol,
            4 => ImageLayout::TwoByTwo,
            6 => ImageLayout::ThreeByTwo,
            n if n > 6 => ImageLayout::ThreeCol,
            _ => ImageLayout::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageLayout::Single => "single",
            ImageLayout::TwoCol => "2-col",
            ImageLayout::ThreeCol => "3-col",
            ImageLayout::TwoByTwo => "2x2",
            ImageLayout::ThreeByTwo => "3x2",
            ImageLayout::Other => "other",
        }
    }
}

impl fmt::Display for ImageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engagement counters scraped from a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub views: u32,
    pub comments: u32,
    pub likes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub kind: RecordKind,
    pub slug: String,
    pub locale: String,
    pub title: String,
    pub pub_date: Option<NaiveDate>,
    pub author: Option<String>,
    pub reading_time: Option<String>,
    pub description: String,
    pub featured_image: Option<String>,
    pub category: Option<ArtworkCategory>,
    pub order: Option<u32>,
    pub image_layout: Option<ImageLayout>,
    pub counters: Counters,
    pub draft: bool,
    pub body: String,
}

impl DocumentRecord {
    pub fn new(kind: RecordKind, slug: impl Into<String>, title: impl Into<String>) -> Self {
        DocumentRecord {
            kind,
            slug: slug.into(),
            locale: "he".to_string(),
            title: title.into(),
            pub_date: None,
            author: None,
            reading_time: None,
            description: String::new(),
            featured_image: None,
            category: None,
            order: None,
            image_layout: None,
            counters: Counters::default(),
            draft: false,
            body: String::new(),
        }
    }

    /// Header keys for this record's kind, in output order.
    pub fn front_matter(&self) -> FrontMatter {
        let mut front = FrontMatter::new();
        front.push("title", self.title.as_str());

        match self.kind {
            RecordKind::BlogPost => {
                if let Some(date) = self.pub_date {
                    front.push("pubDate", date);
                }
                front.push("author", self.author.clone().unwrap_or_default());
                front.push("readingTime", self.reading_time.clone().unwrap_or_default());
                front.push("description", self.description.as_str());
                front.push("featuredImage", self.featured_image.clone().unwrap_or_default());
                front.push("views", self.counters.views);
                front.push("comments", self.counters.comments);
                front.push("likes", self.counters.likes);
                if let Some(layout) = self.image_layout {
                    front.push("imageLayout", layout.as_str());
                }
                front.push("draft", self.draft);
            }
            RecordKind::Page => {
                front.push("description", self.description.as_str());
                if let Some(image) = &self.featured_image {
                    front.push("featuredImage", image.as_str());
                }
            }
            RecordKind::Artwork => {
                if let Some(category) = self.category {
                    front.push("category", category.as_str());
                }
                front.push("featuredImage", self.featured_image.clone().unwrap_or_default());
                front.push("order", self.order.unwrap_or(0));
                if !self.description.is_empty() {
                    front.push("description", self.description.as_str());
                }
            }
        }
        front
    }

    /// Full persisted text: header plus body.
    pub fn to_markdown(&self) -> String {
        self.front_matter().render(&self.body)
    }
}
