//! Error types for pipeline operations
//!
//! Conversion itself never fails (see [`crate::convert`]); these errors cover
//! the I/O edges of a batch run: reading sources, decoding sidecars and
//! writing records.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading sources or persisting records
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A source or record file could not be read or written
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A scrape sidecar (`*.meta.json`) was present but malformed
    #[error("Malformed scrape metadata '{}': {source}", path.display())]
    Meta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A configured regular expression did not compile
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// Collection not found in registry
    #[error("Collection '{0}' not found")]
    UnknownCollection(String),
    /// The source directory itself could not be enumerated
    #[error("Cannot enumerate sources in '{}': {message}", path.display())]
    Enumerate { path: PathBuf, message: String },
    /// Two records of one run map to the same output file
    #[error("Record '{}' is already produced by '{}'", path.display(), first.display())]
    DuplicateRecord { path: PathBuf, first: PathBuf },
    /// A persisted record could not be read back
    #[error("Malformed front matter: {0}")]
    FrontMatter(String),
    /// The front-matter header is not valid YAML
    #[error("Malformed front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
