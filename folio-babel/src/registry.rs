//! Collection registry for collection discovery and selection
//!
//! This module provides a centralized registry for all content collections.
//! Collections can be registered and retrieved by name, and the registry
//! decides which collection a scraped source page belongs to.

use crate::collections::{ArtworkCollection, BlogCollection, BuildContext, Collection, PageCollection};
use crate::error::{PipelineError, Result};
use crate::record::DocumentRecord;
use crate::source::SourceDocument;
use std::collections::HashMap;

/// Registry of content collections
///
/// # Examples
///
/// ```ignore
/// let mut registry = CollectionRegistry::new();
/// registry.register(BlogCollection::default());
///
/// let blog = registry.get("blog")?;
/// let records = blog.build(&source, &ctx)?;
/// ```
pub struct CollectionRegistry {
    collections: HashMap<String, Box<dyn Collection>>,
}

impl CollectionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        CollectionRegistry {
            collections: HashMap::new(),
        }
    }

    /// Register a collection
    ///
    /// If a collection with the same name already exists, it will be replaced.
    pub fn register<C: Collection + 'static>(&mut self, collection: C) {
        self.collections
            .insert(collection.name().to_string(), Box::new(collection));
    }

    /// Get a collection by name
    pub fn get(&self, name: &str) -> Result<&dyn Collection> {
        self.collections
            .get(name)
            .map(|c| c.as_ref())
            .ok_or_else(|| PipelineError::UnknownCollection(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// List all collection names (sorted)
    pub fn list_collections(&self) -> Vec<String> {
        let mut names: Vec<_> = self.collections.keys().cloned().collect();
        names.sort();
        names
    }

    /// Collection a source page belongs to, if any
    ///
    /// Collections are consulted in name order, so overlapping rules resolve
    /// the same way on every run.
    pub fn detect_collection(&self, source_name: &str) -> Option<&dyn Collection> {
        self.list_collections()
            .iter()
            .filter_map(|name| self.collections.get(name))
            .map(|c| c.as_ref())
            .find(|c| c.accepts(source_name))
    }

    /// Build a source page with the named collection
    pub fn build(
        &self,
        source: &SourceDocument,
        collection: &str,
        ctx: &BuildContext,
    ) -> Result<Vec<DocumentRecord>> {
        self.get(collection)?.build(source, ctx)
    }

    /// Create a registry with the site's collections
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BlogCollection::default());
        registry.register(PageCollection::default());
        registry.register(ArtworkCollection::default());
        registry
    }
}

impl Default for CollectionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
