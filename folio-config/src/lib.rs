//! Shared configuration loader for the folio pipeline.
//!
//! `defaults/folio.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`FolioConfig`].
//!
//! Values that need validation (regexes, month tables, artwork categories) are
//! checked when the config is turned into pipeline types, not at load time, so
//! [`FolioConfig::pipeline_options`] and [`FolioConfig::registry`] return
//! `Result`s.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use folio_babel::collections::{ArtworkCollection, BlogCollection, PageCollection};
use folio_babel::convert::ConverterOptions;
use folio_babel::dates::{DateDeriver, FallbackYear, MonthTable};
use folio_babel::describe::{DescriptionStrategy, Describer};
use folio_babel::extract::{CounterPattern, ExtractProfile};
use folio_babel::images::{AssetPattern, ImageFilter};
use folio_babel::markup::ChromeRules;
use folio_babel::record::ArtworkCategory;
use folio_babel::{CollectionRegistry, PipelineOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/folio.default.toml");

/// Top-level configuration consumed by folio applications.
#[derive(Debug, Clone, Deserialize)]
pub struct FolioConfig {
    pub paths: PathsConfig,
    pub convert: ConvertConfig,
    pub images: ImagesConfig,
    pub chrome: ChromeConfig,
    pub describe: DescribeConfig,
    pub dates: DatesConfig,
    pub extract: ExtractConfig,
    pub record: RecordConfig,
    pub collections: CollectionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub source: PathBuf,
    pub content: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub detect_image_grids: bool,
    pub grid_class_marker: String,
    pub image_prefix: String,
    pub asset_pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    pub min_dimension: u32,
    pub skip_alt_pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChromeConfig {
    pub hook_attribute: String,
    pub removed_tags: Vec<String>,
    pub min_image_dimension: u32,
    pub skip_src_fragments: Vec<String>,
}

impl From<ChromeConfig> for ChromeRules {
    fn from(config: ChromeConfig) -> Self {
        ChromeRules {
            hook_attribute: config.hook_attribute,
            removed_tags: config.removed_tags,
            min_image_dimension: config.min_image_dimension,
            skip_src_fragments: config.skip_src_fragments,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DescribeConfig {
    pub strategy: DescribeStrategy,
    pub min_len: usize,
    pub max_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DescribeStrategy {
    #[serde(rename = "first-block")]
    FirstBlock,
    #[serde(rename = "first-long-block")]
    FirstLongBlock,
    #[serde(rename = "title")]
    Title,
}

impl From<&DescribeConfig> for Describer {
    fn from(config: &DescribeConfig) -> Self {
        let strategy = match config.strategy {
            DescribeStrategy::FirstBlock => DescriptionStrategy::FirstBlock,
            DescribeStrategy::FirstLongBlock => DescriptionStrategy::FirstLongBlock {
                min_len: config.min_len,
            },
            DescribeStrategy::Title => DescriptionStrategy::Title,
        };
        Describer::new(strategy, config.max_len)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatesConfig {
    pub locale: String,
    /// `scrape`, `current` or a year such as `2024`.
    pub fallback_year: String,
}

impl DatesConfig {
    pub fn fallback_year(&self) -> Result<FallbackYear, ConfigError> {
        match self.fallback_year.as_str() {
            "scrape" => Ok(FallbackYear::Scrape),
            "current" => Ok(FallbackYear::Current),
            other => other.parse().map(FallbackYear::Fixed).map_err(|_| {
                ConfigError::Message(format!(
                    "dates.fallback_year must be 'scrape', 'current' or a year, got '{other}'"
                ))
            }),
        }
    }

    pub fn deriver(&self) -> Result<DateDeriver, ConfigError> {
        let table = MonthTable::for_locale(&self.locale).ok_or_else(|| {
            ConfigError::Message(format!("no month names for locale '{}'", self.locale))
        })?;
        Ok(DateDeriver::new(table, self.fallback_year()?))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    pub hook_attribute: String,
    pub title_hook: String,
    pub date_hook: String,
    pub author_hook: String,
    pub reading_time_hook: String,
    pub content_hook: String,
    pub views_label: String,
    pub comments_label: String,
    pub likes_label: String,
}

impl From<ExtractConfig> for ExtractProfile {
    fn from(config: ExtractConfig) -> Self {
        ExtractProfile {
            hook_attribute: config.hook_attribute,
            title_hook: config.title_hook,
            date_hook: config.date_hook,
            author_hook: config.author_hook,
            reading_time_hook: config.reading_time_hook,
            content_hook: config.content_hook,
            views: CounterPattern::new(config.views_label),
            comments: CounterPattern::new(config.comments_label),
            likes: CounterPattern::new(config.likes_label),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordConfig {
    pub locale: String,
    pub default_author: String,
}

/// Which source pages belong to which collection.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsConfig {
    pub blog: BlogConfig,
    pub pages: PagesConfig,
    pub artworks: ArtworksConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogConfig {
    pub prefix: String,
    /// Listing page whose sidecar carries post thumbnails.
    pub listing: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesConfig {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtworksConfig {
    pub galleries: Vec<GalleryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryConfig {
    pub source: String,
    pub category: String,
}

impl FolioConfig {
    /// Conversion settings for a batch or single-file run.
    pub fn pipeline_options(&self) -> Result<PipelineOptions, ConfigError> {
        let asset_pattern = AssetPattern::new(&self.convert.asset_pattern)
            .map_err(|err| ConfigError::Message(format!("convert.asset_pattern: {err}")))?;
        let images = ImageFilter::new(self.images.min_dimension, &self.images.skip_alt_pattern)
            .map_err(|err| ConfigError::Message(format!("images.skip_alt_pattern: {err}")))?;

        Ok(PipelineOptions {
            converter: ConverterOptions {
                detect_image_grids: self.convert.detect_image_grids,
                grid_class_marker: self.convert.grid_class_marker.clone(),
                image_prefix: self.convert.image_prefix.clone(),
                asset_pattern,
                describer: Describer::from(&self.describe),
            },
            dates: self.dates.deriver()?,
            extract: self.extract.clone().into(),
            chrome: self.chrome.clone().into(),
            images,
            default_author: self.record.default_author.clone(),
            locale: self.record.locale.clone(),
        })
    }

    /// Registry holding the blog, pages and artworks collections as configured.
    pub fn registry(&self) -> Result<CollectionRegistry, ConfigError> {
        let galleries = self
            .collections
            .artworks
            .galleries
            .iter()
            .map(|gallery| {
                gallery
                    .category
                    .parse::<ArtworkCategory>()
                    .map(|category| (gallery.source.clone(), category))
                    .map_err(ConfigError::Message)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut registry = CollectionRegistry::new();
        registry.register(BlogCollection::new(
            self.collections.blog.prefix.clone(),
            self.collections.blog.listing.clone(),
        ));
        registry.register(PageCollection::new(self.collections.pages.names.iter()));
        registry.register(ArtworkCollection::new(galleries));
        Ok(registry)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<FolioConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FolioConfig, ConfigError> {
    Loader::new().build()
}
