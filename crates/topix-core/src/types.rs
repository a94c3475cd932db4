//! Core types for topix-core.
//!
//! This module defines the fundamental data structures shared across all
//! layers: the [`Concept`] record, its per-language [`LabelSet`], and the
//! fixed [`DataSource`] provenance descriptor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language tag given to labels that carry none, and to concepts built with
/// [`Concept::new`].
pub const DEFAULT_LANGUAGE: &str = "en";

/// Preferred and alternate labels of one concept in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    /// Canonical display name. `None` when the concept only has synonyms in
    /// this language.
    pub preferred: Option<String>,
    /// Synonyms, in export order.
    pub alternates: Vec<String>,
}

/// One entry of the controlled vocabulary.
///
/// Parent links are id references resolved through the
/// [`ConceptIndex`](crate::index::ConceptIndex), never direct pointers, so a
/// table can be dropped and rebuilt wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    /// Opaque, stable identifier (an IRI for SKOS exports).
    pub id: String,
    /// Label sets keyed by lowercase language tag.
    pub labels: BTreeMap<String, LabelSet>,
    /// Immediate broader concept, if any.
    pub parent_id: Option<String>,
}

impl Concept {
    /// A concept with a preferred label in [`DEFAULT_LANGUAGE`].
    pub fn new(id: impl Into<String>, preferred: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            labels: BTreeMap::new(),
            parent_id: None,
        }
        .with_label(DEFAULT_LANGUAGE, preferred)
    }

    pub fn with_label(mut self, language: &str, preferred: impl Into<String>) -> Self {
        self.labels.entry(language.to_ascii_lowercase()).or_default().preferred =
            Some(preferred.into());
        self
    }

    pub fn with_alternate(self, label: impl Into<String>) -> Self {
        self.with_alternate_in(DEFAULT_LANGUAGE, label)
    }

    pub fn with_alternate_in(mut self, language: &str, label: impl Into<String>) -> Self {
        self.labels
            .entry(language.to_ascii_lowercase())
            .or_default()
            .alternates
            .push(label.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Preferred label in `language`, if the concept has one there.
    pub fn preferred_label(&self, language: &str) -> Option<&str> {
        self.labels
            .get(language)
            .and_then(|set| set.preferred.as_deref())
    }

    /// Alternate labels in `language`; empty when there are none.
    pub fn alternate_labels(&self, language: &str) -> &[String] {
        self.labels
            .get(language)
            .map(|set| set.alternates.as_slice())
            .unwrap_or(&[])
    }

    /// Name to display for a query in `language`.
    ///
    /// Falls back to `fallback_language`, then to the first language (in tag
    /// order) that has a preferred label.
    pub fn display_name(&self, language: &str, fallback_language: &str) -> &str {
        self.preferred_label(language)
            .or_else(|| self.preferred_label(fallback_language))
            .or_else(|| {
                self.labels
                    .values()
                    .find_map(|set| set.preferred.as_deref())
            })
            .unwrap_or_default()
    }

    /// Language tags this concept carries labels for, in tag order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }
}

/// Provenance descriptor attached to every rendered graph.
///
/// Comes from the `[data_source]` configuration section, not from the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    /// Graph identifier, e.g. `urn:cessda:elsst-v5`.
    pub id: String,
    pub local_identifier: String,
    pub name: String,
    pub url: String,
}
