//! Record publishing.
//!
//! Persists [`DocumentRecord`]s in the layout the site generator reads:
//!
//! ```text
//! <content_dir>/<collection dir>/<locale>/<slug>.md
//! ```
//!
//! Records are written wholesale; an existing file is overwritten, never
//! merged. For single-document conversion without a content tree, use
//! [`publish`] with or without an explicit output path.

use crate::error::{PipelineError, Result};
use crate::record::DocumentRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a record lives under `content_dir`.
pub fn record_path(content_dir: &Path, record: &DocumentRecord) -> PathBuf {
    content_dir
        .join(record.kind.directory())
        .join(&record.locale)
        .join(format!("{}.md", record.slug))
}

/// Write a record into the content tree, creating directories as needed.
/// Returns the written path.
pub fn write_record(content_dir: &Path, record: &DocumentRecord) -> Result<PathBuf> {
    let path = record_path(content_dir, record);
    write_to_path(path, record.to_markdown())
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Rendered record held in memory (no output path given).
    InMemory(String),
    /// Path to the written file.
    File(PathBuf),
}

/// Render a record, writing it to `output` when one is given.
pub fn publish(record: &DocumentRecord, output: Option<&Path>) -> Result<PublishArtifact> {
    let text = record.to_markdown();
    match output {
        Some(path) => write_to_path(path.to_path_buf(), text).map(PublishArtifact::File),
        None => Ok(PublishArtifact::InMemory(text)),
    }
}

fn write_to_path(path: PathBuf, text: String) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    fs::write(&path, text).map_err(|e| PipelineError::io(&path, e))?;
    Ok(path)
}

/// `path` relative to `base` for log output, or `path` itself.
pub fn display_path(path: &Path, base: &Path) -> String {
    pathdiff::diff_paths(path, base)
        .filter(|rel| !rel.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
