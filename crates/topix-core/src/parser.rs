//! Vocabulary parser: reads a SKOS JSON-LD export into [`Concept`] records.
//!
//! The export is an external schema. Nodes are first inspected as loose JSON
//! to find the `skos:Concept` records; each record is then deserialized into a
//! strict typed shape. Anything that does not fit fails the whole load: a
//! partially loaded vocabulary produces silently incomplete search results.
//!
//! Accepted document shapes:
//!
//! ```text
//! { "@graph": [ node, ... ] }
//! [ { "@graph": [ node, ... ] }, ... ]     graphs are concatenated
//! [ node, ... ]
//! ```
//!
//! Predicates are accepted as full IRIs or as `skos:` CURIEs. Labels may be
//! `{"@value", "@language"}` objects or plain strings, singly or in arrays.

use crate::error::{LoadError, ParseError};
use crate::types::{Concept, LabelSet};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

const SKOS_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
const SKOS_CONCEPT_CURIE: &str = "skos:Concept";

// ---------------------------------------------------------------------------
// Record shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Tagged {
        #[serde(rename = "@value")]
        value: String,
        #[serde(rename = "@language", default)]
        language: Option<String>,
    },
    Plain(String),
}

impl RawLabel {
    /// `(value, language)` with the tag lower-cased; untagged labels take
    /// `default_language`.
    fn into_parts(self, default_language: &str) -> (String, String) {
        match self {
            RawLabel::Tagged {
                value,
                language: Some(language),
            } if !language.trim().is_empty() => (value, language.trim().to_ascii_lowercase()),
            RawLabel::Tagged { value, .. } | RawLabel::Plain(value) => {
                (value, default_language.to_string())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRef {
    Node {
        #[serde(rename = "@id")]
        id: String,
    },
    Iri(String),
}

impl RawRef {
    fn into_id(self) -> String {
        match self {
            RawRef::Node { id } | RawRef::Iri(id) => id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConcept {
    #[serde(rename = "@id", default)]
    id: Option<String>,
    #[serde(
        rename = "http://www.w3.org/2004/02/skos/core#prefLabel",
        alias = "skos:prefLabel",
        default
    )]
    pref_label: OneOrMany<RawLabel>,
    #[serde(
        rename = "http://www.w3.org/2004/02/skos/core#altLabel",
        alias = "skos:altLabel",
        default
    )]
    alt_label: OneOrMany<RawLabel>,
    #[serde(
        rename = "http://www.w3.org/2004/02/skos/core#broader",
        alias = "skos:broader",
        default
    )]
    broader: OneOrMany<RawRef>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Parse an export held in memory. Concepts come back in document order.
pub fn parse_str(input: &str, default_language: &str) -> Result<Vec<Concept>, LoadError> {
    let document: Value = serde_json::from_str(input).map_err(ParseError::from)?;
    parse_value(document, default_language)
}

/// Parse an already-decoded JSON document.
pub fn parse_value(document: Value, default_language: &str) -> Result<Vec<Concept>, LoadError> {
    let nodes = graph_nodes(document)?;
    let mut concepts = Vec::new();
    let mut skipped = 0usize;

    for (position, node) in nodes.into_iter().enumerate() {
        if !is_concept(&node) {
            skipped += 1;
            continue;
        }
        concepts.push(concept_from_node(position, node, default_language)?);
    }

    debug!(
        concepts = concepts.len(),
        skipped, "parsed vocabulary document"
    );
    Ok(concepts)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn graph_nodes(document: Value) -> Result<Vec<Value>, ParseError> {
    match document {
        Value::Object(mut root) => match root.remove("@graph") {
            Some(graph) => Ok(flatten_graph(graph)),
            None => Err(ParseError::MissingGraph),
        },
        Value::Array(items) => {
            let mut nodes = Vec::new();
            for item in items {
                match item {
                    Value::Object(mut wrapper) if wrapper.contains_key("@graph") => {
                        if let Some(graph) = wrapper.remove("@graph") {
                            nodes.extend(flatten_graph(graph));
                        }
                    }
                    node => nodes.push(node),
                }
            }
            Ok(nodes)
        }
        _ => Err(ParseError::MissingGraph),
    }
}

fn flatten_graph(graph: Value) -> Vec<Value> {
    match graph {
        Value::Array(nodes) => nodes,
        node => vec![node],
    }
}

fn is_concept(node: &Value) -> bool {
    let is_concept_type = |t: &str| t == SKOS_CONCEPT || t == SKOS_CONCEPT_CURIE;
    match node.get("@type") {
        Some(Value::String(t)) => is_concept_type(t),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(is_concept_type),
        _ => false,
    }
}

fn concept_from_node(
    position: usize,
    node: Value,
    default_language: &str,
) -> Result<Concept, LoadError> {
    let record = node
        .get("@id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("@graph[{position}]"));

    let raw: RawConcept = serde_json::from_value(node).map_err(|source| ParseError::Record {
        record: record.clone(),
        source,
    })?;

    let id = raw
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or(LoadError::MissingField {
            record,
            field: "@id",
        })?;

    let mut labels: BTreeMap<String, LabelSet> = BTreeMap::new();
    for label in raw.pref_label.into_vec() {
        let (value, language) = label.into_parts(default_language);
        if value.trim().is_empty() {
            continue;
        }
        let set = labels.entry(language).or_default();
        match &set.preferred {
            Some(kept) => debug!(concept = %id, kept = %kept, ignored = %value, "extra prefLabel"),
            None => set.preferred = Some(value),
        }
    }
    if !labels.values().any(|set| set.preferred.is_some()) {
        return Err(LoadError::MissingField {
            record: id,
            field: "skos:prefLabel",
        });
    }

    for label in raw.alt_label.into_vec() {
        let (value, language) = label.into_parts(default_language);
        if !value.trim().is_empty() {
            labels.entry(language).or_default().alternates.push(value);
        }
    }

    let mut broader = raw
        .broader
        .into_vec()
        .into_iter()
        .map(RawRef::into_id)
        .filter(|parent| !parent.trim().is_empty());
    let parent_id = broader.next();
    if broader.next().is_some() {
        debug!(concept = %id, "multiple broader concepts; keeping the first");
    }

    Ok(Concept {
        id,
        labels,
        parent_id,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
