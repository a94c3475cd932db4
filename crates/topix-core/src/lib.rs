//! topix-core: thesaurus index and query resolver.
//!
//! This crate exposes the four pipeline layers as public modules, plus the
//! store that shares the built index and the shared types.
//!
//! # Architecture
//!
//! ```text
//! Parser ──► Index ──► Search ──► Export
//!              │
//!            Store (build-then-swap on reload)
//! ```
//!
//! The parser runs once per (re)load. The index is immutable once built and
//! shared by `Arc`; queries never take a lock while searching.

pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod normalizer;
pub mod parser;
pub mod search;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::{ConsistencyError, LoadError, ParseError, QueryError};
pub use export::{GraphRenderer, TopicGraph};
pub use index::{ConceptIndex, DanglingParentPolicy, HierarchyReport, IndexOptions};
pub use search::{Match, Resolution, Resolver};
pub use store::VocabularyStore;
pub use types::{Concept, DataSource, LabelSet, DEFAULT_LANGUAGE};
