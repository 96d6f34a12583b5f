//! Artwork galleries
//!
//! Each gallery page (`art-color`, `art-bw`, ...) holds one category. Every
//! content image on it becomes its own artwork entry, ordered by position.
//! Only the scrape sidecar is read; gallery markup carries nothing else.

use super::{BuildContext, Collection};
use crate::error::Result;
use crate::record::{ArtworkCategory, DocumentRecord, RecordKind};
use crate::source::SourceDocument;

#[derive(Debug, Clone)]
pub struct ArtworkCollection {
    /// Gallery source name → category.
    pub galleries: Vec<(String, ArtworkCategory)>,
}

impl Default for ArtworkCollection {
    fn default() -> Self {
        ArtworkCollection {
            galleries: ArtworkCategory::ALL
                .into_iter()
                .map(|category| (format!("art-{category}"), category))
                .collect(),
        }
    }
}

impl ArtworkCollection {
    pub fn new(galleries: Vec<(String, ArtworkCategory)>) -> Self {
        ArtworkCollection { galleries }
    }

    fn category(&self, source_name: &str) -> Option<ArtworkCategory> {
        self.galleries
            .iter()
            .find(|(name, _)| name == source_name)
            .map(|(_, category)| *category)
    }
}

impl Collection for ArtworkCollection {
    fn name(&self) -> &str {
        "artworks"
    }

    fn description(&self) -> &str {
        "One entry per gallery image, grouped by category"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Artwork
    }

    fn accepts(&self, source_name: &str) -> bool {
        self.category(source_name).is_some()
    }

    fn build(&self, source: &SourceDocument, ctx: &BuildContext) -> Result<Vec<DocumentRecord>> {
        let Some(category) = self.category(&source.name) else {
            return Ok(Vec::new());
        };

        let images = ctx.options.images.content_images(&source.meta);
        if images.is_empty() {
            log::warn!("{}: no images found for {category}", source.name);
        }

        let records = images
            .into_iter()
            .zip(1u32..)
            .filter_map(|(image, position)| {
                let local = image.local.as_deref()?;
                let alt = image.alt.trim();
                let title = if alt.is_empty() {
                    format!("{category} {position}")
                } else {
                    alt.to_string()
                };

                let mut record =
                    DocumentRecord::new(RecordKind::Artwork, format!("{category}-{position}"), title);
                record.locale = ctx.options.locale.clone();
                record.category = Some(category);
                record.featured_image = Some(ctx.image_path(local));
                record.order = Some(position);
                Some(record)
            })
            .collect();
        Ok(records)
    }
}
