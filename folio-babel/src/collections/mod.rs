//! Content collections
//!
//! A collection knows which scraped pages belong to it and how to turn one
//! of them into [`DocumentRecord`]s. The site has three:
//!
//! - [`BlogCollection`]: one post per `blog-*` page
//! - [`PageCollection`]: a fixed list of static pages
//! - [`ArtworkCollection`]: one entry per content image of each gallery page
//!
//! Collections are registered in a [`CollectionRegistry`](crate::registry::CollectionRegistry)
//! and driven by the batch runner. Everything they need beyond the source
//! page itself is passed in a read-only [`BuildContext`], shared by all
//! worker threads.

pub mod artworks;
pub mod blog;
pub mod pages;

pub use artworks::ArtworkCollection;
pub use blog::{BlogCollection, ListingThumbnails};
pub use pages::PageCollection;

use crate::convert::{ConverterOptions, DocumentConverter};
use crate::dates::DateDeriver;
use crate::error::Result;
use crate::extract::ExtractProfile;
use crate::images::ImageFilter;
use crate::markup::ChromeRules;
use crate::record::{DocumentRecord, RecordKind};
use crate::source::SourceDocument;
use chrono::NaiveDate;

/// Trait for content collections
///
/// # Examples
///
/// ```ignore
/// struct Notes;
///
/// impl Collection for Notes {
///     fn name(&self) -> &str {
///         "notes"
///     }
///
///     fn kind(&self) -> RecordKind {
///         RecordKind::Page
///     }
///
///     fn accepts(&self, source_name: &str) -> bool {
///         source_name.starts_with("note-")
///     }
///
///     fn build(&self, source: &SourceDocument, ctx: &BuildContext) -> Result<Vec<DocumentRecord>> {
///         todo!()
///     }
/// }
/// ```
pub trait Collection: Send + Sync {
    /// The name of this collection (e.g. "blog", "pages")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Kind of record this collection produces.
    fn kind(&self) -> RecordKind;

    /// Content directory the records are written under.
    fn directory(&self) -> &str {
        self.kind().directory()
    }

    /// Whether a source page (by file stem) belongs to this collection.
    fn accepts(&self, source_name: &str) -> bool;

    /// Build the records for one source page. A page may yield several
    /// records (galleries) or none.
    fn build(&self, source: &SourceDocument, ctx: &BuildContext) -> Result<Vec<DocumentRecord>>;
}

/// Conversion settings shared by every collection.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub converter: ConverterOptions,
    pub dates: DateDeriver,
    pub extract: ExtractProfile,
    pub chrome: ChromeRules,
    pub images: ImageFilter,
    /// Author used when a post names none.
    pub default_author: String,
    pub locale: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            converter: ConverterOptions::default(),
            dates: DateDeriver::default(),
            extract: ExtractProfile::default(),
            chrome: ChromeRules::default(),
            images: ImageFilter::default(),
            default_author: "Ron Geva".to_string(),
            locale: "he".to_string(),
        }
    }
}

/// Read-only state for one batch run.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub options: PipelineOptions,
    pub converter: DocumentConverter,
    pub thumbnails: ListingThumbnails,
    /// Fallback publish date.
    pub today: NaiveDate,
}

impl BuildContext {
    pub fn new(options: PipelineOptions, today: NaiveDate) -> Self {
        BuildContext {
            converter: DocumentConverter::new(options.converter.clone()),
            options,
            thumbnails: ListingThumbnails::default(),
            today,
        }
    }

    /// Context whose fallback date is the local calendar day.
    pub fn dated_today(options: PipelineOptions) -> Self {
        Self::new(options, chrono::Local::now().date_naive())
    }

    pub fn with_thumbnails(mut self, thumbnails: ListingThumbnails) -> Self {
        self.thumbnails = thumbnails;
        self
    }

    /// Site path of a local image file, e.g. `/images/cat-1.jpg`.
    pub fn image_path(&self, local: &str) -> String {
        format!("{}{}", self.options.converter.image_prefix, local)
    }

    /// Log images the converter could not map to a local file.
    pub(crate) fn report_unresolved(&self, source: &SourceDocument, unresolved: &[String]) {
        for src in unresolved {
            log::warn!("{}: unresolved image {}", source.name, src);
        }
    }
}
