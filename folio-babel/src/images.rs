//! Image-reference table
//!
//! The scraper downloads every remote image and records, per page, which
//! remote URL ended up under which local file name. The same image is
//! referenced in markup under several spellings: the full transform URL,
//! the bare platform asset id, and the asset id without its version suffix.
//! [`ImageRefTable`] registers all of them so that lookup can walk from the
//! most specific key to the most normalized one.
//!
//! The table is built once per document and passed explicitly into
//! conversion; there is no process-wide lookup state.

use crate::error::{PipelineError, Result};
use crate::source::{ScrapeMeta, ScrapedImage};
use regex::Regex;
use std::collections::HashMap;

/// Default platform asset pattern: the first path segment after `/media/`.
pub const DEFAULT_ASSET_PATTERN: &str = r"/media/([^/?#]+)";

/// One known image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Canonical remote identifier (usually the full URL).
    pub remote: String,
    /// Local file name under the site's image directory.
    pub local: String,
    pub alt: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl ImageReference {
    pub fn new(remote: impl Into<String>, local: impl Into<String>) -> Self {
        ImageReference {
            remote: remote.into(),
            local: local.into(),
            alt: None,
            width: 0,
            height: 0,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Extracts platform asset ids from image URLs.
#[derive(Debug, Clone)]
pub struct AssetPattern {
    regex: Regex,
}

impl AssetPattern {
    /// Compile a pattern whose first capture group is the asset id.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| PipelineError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(AssetPattern { regex })
    }

    pub fn asset_id<'a>(&self, src: &'a str) -> Option<&'a str> {
        self.regex
            .captures(src)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Strip the version/transform suffix and the extension:
    /// `abc_photo~mv2.jpg` → `abc_photo`.
    pub fn base_id(asset_id: &str) -> &str {
        let unversioned = asset_id.split('~').next().unwrap_or(asset_id);
        unversioned.split('.').next().unwrap_or(unversioned)
    }
}

impl Default for AssetPattern {
    fn default() -> Self {
        AssetPattern {
            regex: Regex::new(DEFAULT_ASSET_PATTERN).expect("default asset pattern compiles"),
        }
    }
}

impl PartialEq for AssetPattern {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str()
    }
}

/// Mapping from remote identifier spellings to [`ImageReference`]s.
#[derive(Debug, Clone, Default)]
pub struct ImageRefTable {
    entries: HashMap<String, ImageReference>,
}

impl ImageRefTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single explicit key. Later inserts replace earlier ones.
    pub fn insert(&mut self, key: impl Into<String>, reference: ImageReference) {
        self.entries.insert(key.into(), reference);
    }

    /// Add a reference under every alias it is known by. Existing keys are
    /// kept, so the first registered image wins an ambiguous alias.
    pub fn register(&mut self, reference: ImageReference, pattern: &AssetPattern) {
        let mut keys = vec![reference.remote.clone(), reference.local.clone()];
        if let Some(id) = pattern.asset_id(&reference.remote) {
            keys.push(id.to_string());
            keys.push(AssetPattern::base_id(id).to_string());
        }
        for key in keys.into_iter().filter(|k| !k.is_empty()) {
            self.entries.entry(key).or_insert_with(|| reference.clone());
        }
    }

    /// Build a table from a page's scrape sidecar. Images that were never
    /// downloaded are skipped.
    pub fn from_scrape_meta(meta: &ScrapeMeta, pattern: &AssetPattern) -> Self {
        let mut table = ImageRefTable::new();
        for image in &meta.images {
            if let Some(reference) = image.to_reference() {
                table.register(reference, pattern);
            }
        }
        table
    }

    pub fn get(&self, key: &str) -> Option<&ImageReference> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an image `src`, probing from the most specific key to the most
    /// normalized one. First hit wins.
    pub fn resolve(&self, src: &str, pattern: &AssetPattern) -> Option<&ImageReference> {
        probe_keys(src, pattern)
            .iter()
            .find_map(|key| self.entries.get(key.as_str()))
    }
}

/// Lookup keys for `src`, in probe order.
pub fn probe_keys(src: &str, pattern: &AssetPattern) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(id) = pattern.asset_id(src) {
        let base = AssetPattern::base_id(id);
        keys.push(id.to_string());
        for ext in ["jpg", "webp", "png"] {
            keys.push(format!("{base}.{ext}"));
        }
        keys.push(base.to_string());
    }
    keys.push(src.to_string());
    if let Some(file_name) = last_segment(src) {
        keys.push(file_name.to_string());
    }
    keys.dedup();
    keys
}

fn last_segment(src: &str) -> Option<&str> {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    path.rsplit('/').next().filter(|s| !s.is_empty() && *s != src)
}

/// Which scraped images are page content rather than icons.
#[derive(Debug, Clone)]
pub struct ImageFilter {
    pub min_dimension: u32,
    pub skip_alt: Option<Regex>,
}

impl ImageFilter {
    pub fn new(min_dimension: u32, skip_alt_pattern: &str) -> Result<Self> {
        let skip_alt = if skip_alt_pattern.is_empty() {
            None
        } else {
            let case_insensitive = format!("(?i){skip_alt_pattern}");
            Some(
                Regex::new(&case_insensitive).map_err(|source| PipelineError::Pattern {
                    pattern: skip_alt_pattern.to_string(),
                    source,
                })?,
            )
        };
        Ok(ImageFilter {
            min_dimension,
            skip_alt,
        })
    }

    pub fn is_content(&self, image: &ScrapedImage) -> bool {
        let large = image.width > self.min_dimension && image.height > self.min_dimension;
        let social = self
            .skip_alt
            .as_ref()
            .map(|re| re.is_match(&image.alt))
            .unwrap_or(false);
        large && !social && image.local.is_some()
    }

    /// Content images of a page, in scrape order.
    pub fn content_images<'a>(&self, meta: &'a ScrapeMeta) -> Vec<&'a ScrapedImage> {
        meta.images.iter().filter(|img| self.is_content(img)).collect()
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        ImageFilter {
            min_dimension: 50,
            skip_alt: Regex::new("(?i)linkedin|whatsapp|instagram|facebook").ok(),
        }
    }
}
