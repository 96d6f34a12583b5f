//! Blog posts
//!
//! Every `blog-<slug>.html` page except the listing becomes one post. The
//! listing page is not converted; its sidecar supplies the thumbnails shown
//! in the blog index, keyed by post title, which are preferred as featured
//! images.

use super::{BuildContext, Collection};
use crate::error::Result;
use crate::extract::PageFacts;
use crate::markup::{parse_html, prune_chrome};
use crate::record::{DocumentRecord, ImageLayout, RecordKind};
use crate::slug::slug_from_source;
use crate::source::{ScrapeMeta, SourceDocument};
use std::collections::HashMap;

/// Minimum width for a listing image to count as a thumbnail.
const THUMBNAIL_MIN_WIDTH: u32 = 50;

/// Post title → local thumbnail file, from the blog listing's sidecar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingThumbnails {
    by_title: HashMap<String, String>,
}

impl ListingThumbnails {
    pub fn from_meta(meta: &ScrapeMeta) -> Self {
        let by_title = meta
            .images
            .iter()
            .filter(|img| img.width > THUMBNAIL_MIN_WIDTH && !img.alt.trim().is_empty())
            .filter_map(|img| {
                img.local
                    .as_ref()
                    .map(|local| (img.alt.trim().to_string(), local.clone()))
            })
            .collect();
        ListingThumbnails { by_title }
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.by_title.get(title.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct BlogCollection {
    pub prefix: String,
    pub listing_name: String,
}

impl Default for BlogCollection {
    fn default() -> Self {
        BlogCollection {
            prefix: "blog-".to_string(),
            listing_name: "blog-listing".to_string(),
        }
    }
}

impl BlogCollection {
    pub fn new(prefix: impl Into<String>, listing_name: impl Into<String>) -> Self {
        BlogCollection {
            prefix: prefix.into(),
            listing_name: listing_name.into(),
        }
    }

    fn featured_image(&self, title: &str, source: &SourceDocument, ctx: &BuildContext) -> Option<String> {
        if let Some(thumbnail) = ctx.thumbnails.get(title) {
            return Some(ctx.image_path(thumbnail));
        }
        // The first content image is usually a header banner
        let content = ctx.options.images.content_images(&source.meta);
        content
            .get(1)
            .or_else(|| content.first())
            .and_then(|img| img.local.as_deref())
            .map(|local| ctx.image_path(local))
    }
}

impl Collection for BlogCollection {
    fn name(&self) -> &str {
        "blog"
    }

    fn description(&self) -> &str {
        "Blog posts with date, author and engagement counters"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::BlogPost
    }

    fn accepts(&self, source_name: &str) -> bool {
        source_name.starts_with(&self.prefix) && source_name != self.listing_name
    }

    fn build(&self, source: &SourceDocument, ctx: &BuildContext) -> Result<Vec<DocumentRecord>> {
        let options = &ctx.options;
        let document = parse_html(&source.html);
        let facts = PageFacts::extract(&source.html, &document, &options.extract);

        let slug = slug_from_source(&source.name, &self.prefix);
        let title = facts.title.clone().unwrap_or_else(|| {
            source
                .name
                .strip_prefix(&self.prefix)
                .unwrap_or(&source.name)
                .to_string()
        });

        let refs = crate::images::ImageRefTable::from_scrape_meta(
            &source.meta,
            &options.converter.asset_pattern,
        );
        let (body, excerpt) = match facts.content {
            Some(content) => {
                let pruned = prune_chrome(content, &options.chrome);
                let result = ctx.converter.convert_element(&pruned, &refs);
                ctx.report_unresolved(source, &result.unresolved);
                (result.body, result.excerpt)
            }
            None => {
                log::warn!("{}: no post content found", source.name);
                (String::new(), None)
            }
        };

        let content_images = options.images.content_images(&source.meta).len();

        let mut record = DocumentRecord::new(RecordKind::BlogPost, slug, title.clone());
        record.locale = options.locale.clone();
        record.pub_date = Some(options.dates.derive(
            facts.date_text.as_deref().unwrap_or_default(),
            source.meta.scraped_at.as_deref(),
            ctx.today,
        ));
        record.author = Some(facts.author.unwrap_or_else(|| options.default_author.clone()));
        record.reading_time = facts.reading_time;
        record.description = excerpt.unwrap_or_else(|| options.converter.describer.title(&title));
        record.featured_image = self.featured_image(&title, source, ctx);
        record.counters = facts.counters;
        record.image_layout = (content_images > 0).then(|| ImageLayout::from_count(content_images));
        record.body = body;

        Ok(vec![record])
    }
}
