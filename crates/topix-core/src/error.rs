//! Error taxonomy for topix-core.
//!
//! Load-time errors ([`LoadError`]) are fatal at startup: the service must not
//! serve a partially loaded vocabulary. Query-time errors ([`QueryError`]) are
//! returned to the caller as values.

use std::path::PathBuf;
use thiserror::Error;

/// The export document (or one of its records) is not well-formed.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document contains no @graph")]
    MissingGraph,

    #[error("malformed concept record {record}: {source}")]
    Record {
        record: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The broader-concept hierarchy is not a forest.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("cycle in broader hierarchy: walking up from {start} revisits {revisited}")]
    Cycle { start: String, revisited: String },

    #[error("concept {child} references missing parent {parent}")]
    DanglingParent { child: String, parent: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read vocabulary {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("concept record {record} is missing required field {field}")]
    MissingField { record: String, field: &'static str },

    #[error("duplicate concept id {0}")]
    DuplicateId(String),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error("failed to build label index: {0}")]
    Index(#[from] fst::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Client input error; never a server fault.
    #[error("search term {term:?} is shorter than {min_length} characters")]
    InvalidQuery { term: String, min_length: usize },

    #[error("topic {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}
