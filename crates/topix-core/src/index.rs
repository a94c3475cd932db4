//! Concept index: the immutable lookup structure every query reads.
//!
//! Three structures are built once from a concept table:
//!
//! - an `id -> slot` map over the table (kept in document order);
//! - per language, an FST of normalized label keys, each mapped to the set of
//!   concept slots carrying that label (preferred or alternate);
//! - nothing for the hierarchy: parent links stay implicit in
//!   [`Concept::parent_id`] and [`ConceptIndex::ancestors`] walks them.
//!
//! Search streams the label FST through a substring automaton, so a label
//! shared by many concepts is tested once.

use crate::error::{ConsistencyError, LoadError};
use crate::normalizer::normalize;
use crate::parser;
use crate::types::{Concept, DEFAULT_LANGUAGE};
use chrono::{DateTime, Utc};
use fst::{Automaton, IntoStreamer, Streamer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do when a `parent_id` names a concept absent from the table
/// (typically a filtered or partial export).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanglingParentPolicy {
    /// End the ancestor chain at the last resolvable concept.
    #[default]
    Truncate,
    /// Fail the load with [`ConsistencyError::DanglingParent`].
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    pub default_language: String,
    pub dangling_parents: DanglingParentPolicy,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            dangling_parents: DanglingParentPolicy::default(),
        }
    }
}

/// Shape of the broader hierarchy, produced by [`ConceptIndex::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyReport {
    pub concepts: usize,
    /// Concepts whose ancestor chain ends at themselves: no parent, or a
    /// parent absent from the export.
    pub roots: usize,
    /// Longest ancestor chain.
    pub max_depth: usize,
    /// `(child, missing parent)` pairs, in table order.
    pub dangling: Vec<(String, String)>,
}

// ---------------------------------------------------------------------------
// ConceptIndex
// ---------------------------------------------------------------------------

pub struct ConceptIndex {
    concepts: Vec<Concept>,
    slots: HashMap<String, usize>,
    labels: BTreeMap<String, LabelIndex>,
    options: IndexOptions,
    built_at: DateTime<Utc>,
}

impl fmt::Debug for ConceptIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConceptIndex")
            .field("concepts", &self.concepts.len())
            .field("languages", &self.labels.keys().collect::<Vec<_>>())
            .field("options", &self.options)
            .field("built_at", &self.built_at)
            .finish_non_exhaustive()
    }
}

impl ConceptIndex {
    /// Build the lookup structures over `concepts`.
    ///
    /// Rejects duplicate ids. Does not check the hierarchy; call
    /// [`validate`](Self::validate) for that (the loaders do).
    pub fn build(concepts: Vec<Concept>, options: IndexOptions) -> Result<Self, LoadError> {
        let mut slots = HashMap::with_capacity(concepts.len());
        let mut postings: BTreeMap<String, BTreeMap<String, BTreeSet<usize>>> = BTreeMap::new();

        for (slot, concept) in concepts.iter().enumerate() {
            if slots.insert(concept.id.clone(), slot).is_some() {
                return Err(LoadError::DuplicateId(concept.id.clone()));
            }
            for (language, set) in &concept.labels {
                let keys = postings.entry(language.clone()).or_default();
                for label in set.preferred.iter().chain(&set.alternates) {
                    let key = normalize(label);
                    if !key.is_empty() {
                        keys.entry(key).or_default().insert(slot);
                    }
                }
            }
        }

        let mut labels = BTreeMap::new();
        for (language, keys) in postings {
            let index = LabelIndex::build(keys)?;
            debug!(language = %language, labels = index.len(), "indexed labels");
            labels.insert(language, index);
        }

        Ok(Self {
            concepts,
            slots,
            labels,
            options,
            built_at: Utc::now(),
        })
    }

    /// Parse, build and validate an export held in memory.
    pub fn from_json_str(input: &str, options: &IndexOptions) -> Result<Self, LoadError> {
        Self::from_json_str_with_report(input, options).map(|(index, _)| index)
    }

    /// [`from_json_str`](Self::from_json_str), also returning the report
    /// produced by the load-time validation.
    pub fn from_json_str_with_report(
        input: &str,
        options: &IndexOptions,
    ) -> Result<(Self, HierarchyReport), LoadError> {
        let concepts = parser::parse_str(input, &options.default_language)?;
        let index = Self::build(concepts, options.clone())?;
        let report = index.validate()?;
        info!(
            concepts = report.concepts,
            roots = report.roots,
            max_depth = report.max_depth,
            languages = index.labels.len(),
            "vocabulary loaded"
        );
        Ok((index, report))
    }

    /// Read, parse, build and validate the export at `path`.
    pub fn load(path: &Path, options: &IndexOptions) -> Result<Self, LoadError> {
        Self::load_with_report(path, options).map(|(index, _)| index)
    }

    /// [`load`](Self::load), also returning the load-time [`HierarchyReport`].
    pub fn load_with_report(
        path: &Path,
        options: &IndexOptions,
    ) -> Result<(Self, HierarchyReport), LoadError> {
        let input = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = input.len(), "loading vocabulary");
        Self::from_json_str_with_report(&input, options)
    }

    // -- lookups -------------------------------------------------------------

    pub fn get(&self, id: &str) -> Option<&Concept> {
        self.slots.get(id).map(|&slot| &self.concepts[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Ids of concepts with a label in the default language containing
    /// `term`, in table order.
    pub fn search(&self, term: &str) -> Vec<&str> {
        self.search_in(&self.options.default_language, term)
    }

    /// Ids of concepts with a `language` label containing `term` after
    /// normalization, in table order. An empty term matches nothing; an
    /// unknown language matches nothing.
    pub fn search_in(&self, language: &str, term: &str) -> Vec<&str> {
        let needle = normalize(term);
        if needle.is_empty() {
            return Vec::new();
        }
        let Some(labels) = self.labels.get(language) else {
            return Vec::new();
        };

        let mut slots = BTreeSet::new();
        labels.collect_matches(&needle, &mut slots);
        slots
            .into_iter()
            .map(|slot| self.concepts[slot].id.as_str())
            .collect()
    }

    /// Ancestor ids of `id`, from the immediate parent up to the root.
    ///
    /// An id absent from the table has no ancestors. A revisited id is a
    /// [`ConsistencyError::Cycle`]; a missing parent follows the configured
    /// [`DanglingParentPolicy`].
    pub fn ancestors(&self, id: &str) -> Result<Vec<&str>, ConsistencyError> {
        let Some(mut current) = self.get(id) else {
            return Ok(Vec::new());
        };
        let mut seen: HashSet<&str> = HashSet::from([current.id.as_str()]);
        let mut chain = Vec::new();

        while let Some(parent_id) = current.parent_id.as_deref() {
            if !seen.insert(parent_id) {
                return Err(ConsistencyError::Cycle {
                    start: id.to_string(),
                    revisited: parent_id.to_string(),
                });
            }
            match self.get(parent_id) {
                Some(parent) => {
                    chain.push(parent.id.as_str());
                    current = parent;
                }
                None => match self.options.dangling_parents {
                    DanglingParentPolicy::Truncate => {
                        debug!(child = %current.id, parent = %parent_id, "ancestor chain truncated");
                        break;
                    }
                    DanglingParentPolicy::Reject => {
                        return Err(ConsistencyError::DanglingParent {
                            child: current.id.clone(),
                            parent: parent_id.to_string(),
                        })
                    }
                },
            }
        }
        Ok(chain)
    }

    /// Walk every concept's ancestor chain once.
    ///
    /// Fails on the first cycle (and, under [`DanglingParentPolicy::Reject`],
    /// on the first dangling parent). Dangling parents tolerated under
    /// `Truncate` are logged once, as a count.
    pub fn validate(&self) -> Result<HierarchyReport, ConsistencyError> {
        let mut report = HierarchyReport {
            concepts: self.concepts.len(),
            ..HierarchyReport::default()
        };
        for concept in &self.concepts {
            let depth = self.ancestors(&concept.id)?.len();
            report.max_depth = report.max_depth.max(depth);
            match concept.parent_id.as_deref() {
                None => report.roots += 1,
                Some(parent) if !self.contains(parent) => {
                    report.roots += 1;
                    report
                        .dangling
                        .push((concept.id.clone(), parent.to_string()));
                }
                Some(_) => {}
            }
        }
        if !report.dangling.is_empty() {
            warn!(
                dangling = report.dangling.len(),
                "vocabulary references parents absent from the export; their ancestor chains are truncated"
            );
        }
        Ok(report)
    }

    // -- accessors -----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Languages with at least one indexed label, in tag order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    /// Distinct normalized labels indexed for `language`.
    pub fn label_count(&self, language: &str) -> usize {
        self.labels.get(language).map_or(0, LabelIndex::len)
    }

    pub fn default_language(&self) -> &str {
        &self.options.default_language
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

// ---------------------------------------------------------------------------
// Per-language label index
// ---------------------------------------------------------------------------

struct LabelIndex {
    /// Normalized label -> position in `postings`.
    keys: fst::Map<Vec<u8>>,
    /// Concept slots per label, ascending.
    postings: Vec<Vec<usize>>,
}

impl LabelIndex {
    /// `entries` is a BTreeMap, so keys arrive in the byte order the FST
    /// builder requires.
    fn build(entries: BTreeMap<String, BTreeSet<usize>>) -> Result<Self, fst::Error> {
        let keys = fst::Map::from_iter(
            entries
                .keys()
                .enumerate()
                .map(|(position, key)| (key.as_bytes(), position as u64)),
        )?;
        let postings = entries
            .into_values()
            .map(|slots| slots.into_iter().collect())
            .collect();
        Ok(Self { keys, postings })
    }

    fn collect_matches(&self, needle: &str, out: &mut BTreeSet<usize>) {
        let mut stream = self.keys.search(Substring::new(needle)).into_stream();
        while let Some((_, position)) = stream.next() {
            out.extend(self.postings[position as usize].iter().copied());
        }
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

/// Matches keys containing `needle` anywhere. Knuth–Morris–Pratt over UTF-8
/// bytes; byte containment equals char containment because UTF-8 is
/// self-synchronizing.
///
/// State is the length of the needle prefix matched so far; reaching the full
/// length is absorbing.
struct Substring<'a> {
    needle: &'a [u8],
    /// `fallback[i]`: length of the longest proper prefix of `needle[..=i]`
    /// that is also its suffix.
    fallback: Vec<usize>,
}

impl<'a> Substring<'a> {
    fn new(needle: &'a str) -> Self {
        let needle = needle.as_bytes();
        let mut fallback = vec![0; needle.len()];
        let mut k = 0;
        for i in 1..needle.len() {
            while k > 0 && needle[i] != needle[k] {
                k = fallback[k - 1];
            }
            if needle[i] == needle[k] {
                k += 1;
            }
            fallback[i] = k;
        }
        Self { needle, fallback }
    }
}

impl Automaton for Substring<'_> {
    type State = usize;

    fn start(&self) -> usize {
        0
    }

    fn is_match(&self, state: &usize) -> bool {
        *state == self.needle.len()
    }

    fn will_always_match(&self, state: &usize) -> bool {
        *state == self.needle.len()
    }

    fn accept(&self, state: &usize, byte: u8) -> usize {
        let mut k = *state;
        if k == self.needle.len() {
            return k;
        }
        loop {
            if self.needle[k] == byte {
                return k + 1;
            }
            if k == 0 {
                return 0;
            }
            k = self.fallback[k - 1];
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
