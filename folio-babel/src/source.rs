//! Scraped page inputs
//!
//! The scraper leaves, per page, the rendered HTML (`<name>.html`) and a JSON
//! sidecar (`<name>.meta.json`) describing the images it downloaded:
//!
//! ```json
//! {
//!   "url": "https://example.com/post/slug",
//!   "filename": "blog-slug",
//!   "imageCount": 2,
//!   "images": [
//!     { "original": "https://…/media/abc~mv2.jpg", "local": "blog-slug-1.jpg",
//!       "alt": "", "link": null, "width": 800, "height": 600 }
//!   ],
//!   "scrapedAt": "2024-10-01T12:00:00.000Z"
//! }
//! ```
//!
//! A missing sidecar is treated as empty; a malformed one fails that document
//! only.

use crate::error::{PipelineError, Result};
use crate::images::ImageReference;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Decoded `<name>.meta.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapeMeta {
    pub url: Option<String>,
    pub filename: Option<String>,
    pub image_count: Option<usize>,
    pub images: Vec<ScrapedImage>,
    pub scraped_at: Option<String>,
}

impl ScrapeMeta {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Year of the scrape timestamp, when present and well-formed.
    pub fn scraped_year(&self) -> Option<i32> {
        self.scraped_at.as_deref().and_then(crate::dates::year_of)
    }
}

/// One image recorded by the scraper.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrapedImage {
    pub original: String,
    /// `None` when the download failed.
    pub local: Option<String>,
    pub alt: String,
    pub link: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl ScrapedImage {
    pub fn to_reference(&self) -> Option<ImageReference> {
        let local = self.local.as_ref()?;
        let mut reference =
            ImageReference::new(self.original.clone(), local.clone()).with_size(self.width, self.height);
        if !self.alt.trim().is_empty() {
            reference = reference.with_alt(self.alt.trim());
        }
        Some(reference)
    }
}

/// A scraped page ready for conversion.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File stem, e.g. `blog-my-first-post`.
    pub name: String,
    pub path: PathBuf,
    pub html: String,
    pub meta: ScrapeMeta,
}

impl SourceDocument {
    /// Read `<name>.html` and its optional sidecar.
    pub fn load(html_path: &Path) -> Result<Self> {
        let html = fs::read_to_string(html_path).map_err(|e| PipelineError::io(html_path, e))?;
        let name = source_name(html_path);

        let meta_path = sidecar_path(html_path);
        let meta = match fs::read_to_string(&meta_path) {
            Ok(text) => ScrapeMeta::from_json(&text).map_err(|source| PipelineError::Meta {
                path: meta_path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ScrapeMeta::default(),
            Err(e) => return Err(PipelineError::io(&meta_path, e)),
        };

        Ok(SourceDocument {
            name,
            path: html_path.to_path_buf(),
            html,
            meta,
        })
    }

    /// In-memory source, mostly for tests and single-file conversion.
    pub fn from_parts(name: impl Into<String>, html: impl Into<String>, meta: ScrapeMeta) -> Self {
        let name = name.into();
        SourceDocument {
            path: PathBuf::from(format!("{name}.html")),
            name,
            html: html.into(),
            meta,
        }
    }
}

/// `dir/blog-x.html` → `dir/blog-x.meta.json`
pub fn sidecar_path(html_path: &Path) -> PathBuf {
    html_path.with_file_name(format!("{}.meta.json", source_name(html_path)))
}

/// Load a sidecar directly, e.g. the blog listing's thumbnails.
pub fn load_meta(path: &Path) -> Result<Option<ScrapeMeta>> {
    match fs::read_to_string(path) {
        Ok(text) => ScrapeMeta::from_json(&text)
            .map(Some)
            .map_err(|source| PipelineError::Meta {
                path: path.to_path_buf(),
                source,
            }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PipelineError::io(path, e)),
    }
}

fn source_name(html_path: &Path) -> String {
    html_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Enumerate `*.html` files directly under `source_dir`, sorted by name.
///
/// This is the only batch-fatal step: if the directory cannot be read there
/// is nothing to convert.
pub fn discover(source_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| PipelineError::Enumerate {
            path: source_dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "html") {
            found.push(path.to_path_buf());
        }
    }
    found.sort();
    log::debug!("discovered {} source pages in {}", found.len(), source_dir.display());
    Ok(found)
}
