//! Store: owns the current [`ConceptIndex`] and swaps it on reload.
//!
//! The store is the single source of truth for request handlers. Each query
//! takes a [`snapshot`](VocabularyStore::snapshot) and keeps it until it is
//! done, so a reload never shows a handler a half-built or mixed index. A
//! reload builds the replacement completely before taking the write lock,
//! and a failed reload leaves the current index in place.

use crate::error::LoadError;
use crate::index::{ConceptIndex, IndexOptions};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

pub struct VocabularyStore {
    source: PathBuf,
    options: IndexOptions,
    current: RwLock<Arc<ConceptIndex>>,
    generation: AtomicU64,
}

impl VocabularyStore {
    /// Load the export at `source`. Any load error is returned as-is; callers
    /// at startup treat it as fatal.
    pub fn open(source: impl Into<PathBuf>, options: IndexOptions) -> Result<Self, LoadError> {
        let source = source.into();
        let index = ConceptIndex::load(&source, &options)?;
        Ok(Self::with_index(source, options, index))
    }

    /// Wrap an index built elsewhere. `source` is only read by
    /// [`reload`](Self::reload).
    pub fn with_index(source: impl Into<PathBuf>, options: IndexOptions, index: ConceptIndex) -> Self {
        Self {
            source: source.into(),
            options,
            current: RwLock::new(Arc::new(index)),
            generation: AtomicU64::new(1),
        }
    }

    /// The index visible right now.
    pub fn snapshot(&self) -> Arc<ConceptIndex> {
        Arc::clone(&self.current.read())
    }

    /// Rebuild from the source file and swap it in.
    pub fn reload(&self) -> Result<Arc<ConceptIndex>, LoadError> {
        let fresh = Arc::new(ConceptIndex::load(&self.source, &self.options)?);
        self.swap(Arc::clone(&fresh));
        Ok(fresh)
    }

    /// Swap in an already-built index.
    pub fn replace(&self, index: ConceptIndex) -> Arc<ConceptIndex> {
        let fresh = Arc::new(index);
        self.swap(Arc::clone(&fresh));
        fresh
    }

    /// Incremented on every swap; starts at 1.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    fn swap(&self, index: Arc<ConceptIndex>) {
        let concepts = index.len();
        *self.current.write() = index;
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(generation, concepts, "vocabulary index swapped");
    }
}
