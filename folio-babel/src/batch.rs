//! Batch conversion run
//!
//! One run converts every scraped page under a source directory into
//! records under a content directory:
//!
//! 1. enumerate `*.html` sources (the only step that can abort the run)
//! 2. load the blog listing's thumbnails into the shared [`BuildContext`]
//! 3. load and build each document in parallel
//! 4. claim record paths in source order; a later source whose record lands
//!    on an already claimed path fails instead of overwriting it
//! 5. write the claimed records in parallel
//! 6. report written records and per-document failures in source order
//!
//! Documents share nothing mutable: each worker reads its own files and
//! builds from the read-only context.

use crate::collections::{BuildContext, ListingThumbnails};
use crate::error::{PipelineError, Result};
use crate::publish::{display_path, record_path, write_record};
use crate::record::DocumentRecord;
use crate::registry::CollectionRegistry;
use crate::source::{discover, load_meta, SourceDocument};
use rayon::iter::{IntoParallelIterator, IntoParallelRefIterator, ParallelIterator};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRun {
    pub source_dir: PathBuf,
    pub content_dir: PathBuf,
    /// Collections to build; empty means all registered collections.
    pub collections: Vec<String>,
    /// Source name of the blog listing whose sidecar holds thumbnails.
    pub listing_name: Option<String>,
}

/// A document that could not be converted.
#[derive(Debug)]
pub struct BatchFailure {
    pub source: PathBuf,
    pub error: PipelineError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Record files written, in source order.
    pub written: Vec<PathBuf>,
    /// Sources no selected collection accepted.
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Outcome {
    Built(Vec<DocumentRecord>),
    Skipped,
}

impl BatchRun {
    pub fn new(source_dir: impl Into<PathBuf>, content_dir: impl Into<PathBuf>) -> Self {
        BatchRun {
            source_dir: source_dir.into(),
            content_dir: content_dir.into(),
            collections: Vec::new(),
            listing_name: None,
        }
    }

    pub fn with_collections<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_listing(mut self, name: impl Into<String>) -> Self {
        self.listing_name = Some(name.into());
        self
    }

    /// Run the batch. Errors only when the requested collections are unknown
    /// or the source directory cannot be enumerated; everything else is
    /// reported per document.
    pub fn execute(&self, registry: &CollectionRegistry, ctx: BuildContext) -> Result<BatchReport> {
        for name in &self.collections {
            registry.get(name)?;
        }
        let sources = discover(&self.source_dir)?;
        let ctx = ctx.with_thumbnails(self.load_thumbnails());

        log::info!(
            "converting {} sources from {}",
            sources.len(),
            self.source_dir.display()
        );

        let outcomes: Vec<(PathBuf, Result<Outcome>)> = sources
            .par_iter()
            .map(|path| (path.clone(), self.build_one(path, registry, &ctx)))
            .collect();

        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut slots: Vec<(PathBuf, Result<Vec<DocumentRecord>>)> = Vec::new();
        let mut skipped = Vec::new();
        for (source, outcome) in outcomes {
            match outcome {
                Ok(Outcome::Built(records)) => {
                    let checked = self.claim(&mut claimed, &source, &records).map(|_| records);
                    slots.push((source, checked));
                }
                Ok(Outcome::Skipped) => skipped.push(source),
                Err(error) => slots.push((source, Err(error))),
            }
        }

        let written: Vec<(PathBuf, Result<Vec<PathBuf>>)> = slots
            .into_par_iter()
            .map(|(source, records)| {
                let written = records.and_then(|records| self.write_all(&source, &records));
                (source, written)
            })
            .collect();

        let mut report = BatchReport {
            skipped,
            ..BatchReport::default()
        };
        for (source, outcome) in written {
            match outcome {
                Ok(paths) => report.written.extend(paths),
                Err(error) => {
                    log::warn!("{}: {}", source.display(), error);
                    report.failures.push(BatchFailure { source, error });
                }
            }
        }

        log::info!(
            "wrote {} records, skipped {} sources, {} failed",
            report.written.len(),
            report.skipped.len(),
            report.failures.len()
        );
        Ok(report)
    }

    fn load_thumbnails(&self) -> ListingThumbnails {
        let Some(listing) = &self.listing_name else {
            return ListingThumbnails::default();
        };
        let path = self.source_dir.join(format!("{listing}.meta.json"));
        match load_meta(&path) {
            Ok(Some(meta)) => ListingThumbnails::from_meta(&meta),
            Ok(None) => ListingThumbnails::default(),
            Err(e) => {
                log::warn!("ignoring listing thumbnails: {e}");
                ListingThumbnails::default()
            }
        }
    }

    fn selected(&self, name: &str) -> bool {
        self.collections.is_empty() || self.collections.iter().any(|c| c == name)
    }

    fn build_one(&self, path: &Path, registry: &CollectionRegistry, ctx: &BuildContext) -> Result<Outcome> {
        let source_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(collection) = registry
            .detect_collection(&source_name)
            .filter(|c| self.selected(c.name()))
        else {
            log::debug!("{source_name}: no collection, skipped");
            return Ok(Outcome::Skipped);
        };

        let source = SourceDocument::load(path)?;
        Ok(Outcome::Built(collection.build(&source, ctx)?))
    }

    /// Reserve the output paths of one source's records. All or nothing: a
    /// collision leaves the earlier claims untouched.
    fn claim(
        &self,
        claimed: &mut HashMap<PathBuf, PathBuf>,
        source: &Path,
        records: &[DocumentRecord],
    ) -> Result<()> {
        let paths: Vec<PathBuf> = records
            .iter()
            .map(|record| record_path(&self.content_dir, record))
            .collect();
        for (i, path) in paths.iter().enumerate() {
            let earlier = claimed.get(path).cloned().or_else(|| {
                paths[..i]
                    .contains(path)
                    .then(|| source.to_path_buf())
            });
            if let Some(first) = earlier {
                return Err(PipelineError::DuplicateRecord {
                    path: path.clone(),
                    first,
                });
            }
        }
        for path in paths {
            claimed.insert(path, source.to_path_buf());
        }
        Ok(())
    }

    fn write_all(&self, source: &Path, records: &[DocumentRecord]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(records.len());
        for record in records {
            let path = write_record(&self.content_dir, record)?;
            log::info!(
                "{} -> {}",
                source.display(),
                display_path(&path, &self.content_dir)
            );
            written.push(path);
        }
        Ok(written)
    }
}
