//! Builders for indexes, stores, configs and on-disk exports.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use topix_core::{Concept, ConceptIndex, Config, IndexOptions, VocabularyStore};

use super::fixtures::POVERTY_EXPORT;

/// Build an index straight from concepts, without validating the hierarchy.
pub fn index_of(concepts: Vec<Concept>) -> ConceptIndex {
    ConceptIndex::build(concepts, IndexOptions::default()).expect("fixture concepts build")
}

/// The parsed and validated [`POVERTY_EXPORT`].
pub fn poverty_index() -> ConceptIndex {
    ConceptIndex::from_json_str(POVERTY_EXPORT, &IndexOptions::default())
        .expect("poverty fixture loads")
}

/// Write `contents` as `elsst.jsonld` under `dir`.
pub fn write_export(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("elsst.jsonld");
    std::fs::write(&path, contents).expect("write export");
    path
}

/// A store over [`POVERTY_EXPORT`] written to `dir`.
pub fn poverty_store(dir: &Path) -> Arc<VocabularyStore> {
    let path = write_export(dir, POVERTY_EXPORT);
    Arc::new(VocabularyStore::open(path, IndexOptions::default()).expect("store opens"))
}

/// Built-in defaults pointing at `data`.
pub fn config_for(data: &Path) -> Config {
    let mut config = Config::defaults();
    config.vocabulary.path = data.to_path_buf();
    config
}
