//! Search layer: turns a query term into matched concepts with their
//! ancestor chains.
//!
//! A [`Resolver`] borrows one index snapshot for the duration of a query and
//! never mutates it, so any number of resolvers can run concurrently without
//! locking. Matches come back in table (document) order.

use crate::config::SearchConfig;
use crate::error::{ConsistencyError, QueryError};
use crate::index::ConceptIndex;
use std::collections::HashSet;
use tracing::debug;

/// One matched concept and its chain from immediate parent to root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: String,
    pub ancestors: Vec<String>,
}

/// Result of a query: the matches, and the language they were matched in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub language: String,
    pub matches: Vec<Match>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Every concept the result references, each once: matches in order, each
    /// followed by those of its ancestors not yet listed.
    pub fn closure(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.matches
            .iter()
            .flat_map(|m| std::iter::once(&m.id).chain(&m.ancestors))
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

pub struct Resolver<'a> {
    index: &'a ConceptIndex,
    min_term_length: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a ConceptIndex, settings: &SearchConfig) -> Self {
        Self::with_min_term_length(index, settings.min_term_length)
    }

    pub fn with_min_term_length(index: &'a ConceptIndex, min_term_length: usize) -> Self {
        Self {
            index,
            min_term_length,
        }
    }

    /// Resolve `term` against the index's default language.
    pub fn resolve(&self, term: &str) -> Result<Resolution, QueryError> {
        self.resolve_in(term, self.index.default_language())
    }

    /// Resolve `term` against the labels of `language`.
    ///
    /// The trimmed term must be at least `min_term_length` characters. No
    /// match is an empty [`Resolution`], not an error.
    pub fn resolve_in(&self, term: &str, language: &str) -> Result<Resolution, QueryError> {
        let trimmed = term.trim();
        if trimmed.chars().count() < self.min_term_length {
            return Err(QueryError::InvalidQuery {
                term: term.to_string(),
                min_length: self.min_term_length,
            });
        }

        let matches = self
            .index
            .search_in(language, trimmed)
            .into_iter()
            .map(|id| self.with_ancestors(id))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(term = %trimmed, language, matches = matches.len(), "resolved query");
        Ok(Resolution {
            language: language.to_string(),
            matches,
        })
    }

    /// A single concept by id, with its ancestors.
    pub fn lookup(&self, id: &str, language: &str) -> Result<Resolution, QueryError> {
        let concept = self
            .index
            .get(id)
            .ok_or_else(|| QueryError::NotFound(id.to_string()))?;
        Ok(Resolution {
            language: language.to_string(),
            matches: vec![self.with_ancestors(&concept.id)?],
        })
    }

    fn with_ancestors(&self, id: &str) -> Result<Match, ConsistencyError> {
        Ok(Match {
            id: id.to_string(),
            ancestors: self
                .index
                .ancestors(id)?
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }
}
