//! Export layer: renders a [`Resolution`] as a flat SKG-IF JSON-LD graph.
//!
//! The graph holds exactly one `DataSource` node followed by one `Topic` node
//! per distinct concept in the resolution's closure. Related topics are
//! referenced shallowly (type + local identifier) so output never nests.
//! Node order and field order are fixed, so the same resolution always
//! serializes to the same bytes.

use crate::config::{Config, OutputConfig};
use crate::index::ConceptIndex;
use crate::search::Resolution;
use crate::types::{Concept, DataSource};
use serde::Serialize;
use std::collections::HashSet;

const DATA_SOURCE_TYPE: &str = "DataSource";
const TOPIC_TYPE: &str = "Topic";

// ---------------------------------------------------------------------------
// Output graph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicGraph {
    #[serde(rename = "@context")]
    pub context: Vec<ContextEntry>,
    #[serde(rename = "@graph")]
    pub graph: Vec<GraphNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContextEntry {
    Url(String),
    Base {
        #[serde(rename = "@base")]
        base: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GraphNode {
    DataSource(DataSourceNode),
    Topic(TopicNode),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSourceNode {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub local_identifier: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicNode {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub local_identifier: String,
    pub name: String,
    pub source: NodeRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternate_name: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_topic: Option<ShallowRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRef {
    #[serde(rename = "@id")]
    pub id: String,
}

/// Type and identifier of a related entity, without its fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShallowRef {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub local_identifier: String,
}

impl TopicGraph {
    pub fn topics(&self) -> impl Iterator<Item = &TopicNode> {
        self.graph.iter().filter_map(|node| match node {
            GraphNode::Topic(topic) => Some(topic),
            GraphNode::DataSource(_) => None,
        })
    }

    pub fn data_sources(&self) -> impl Iterator<Item = &DataSourceNode> {
        self.graph.iter().filter_map(|node| match node {
            GraphNode::DataSource(source) => Some(source),
            GraphNode::Topic(_) => None,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GraphRenderer {
    data_source: DataSource,
    base_url: String,
    context_url: String,
}

impl GraphRenderer {
    pub fn new(data_source: DataSource, output: &OutputConfig) -> Self {
        Self {
            data_source,
            base_url: output.base_url.clone(),
            context_url: output.context_url.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_source.clone(), &config.output)
    }

    /// `@id` of a topic: the base URL followed by the percent-encoded raw id.
    /// Path separators stay literal; every other reserved byte is escaped.
    pub fn topic_uri(&self, id: &str) -> String {
        let encoded: Vec<_> = id.split('/').map(urlencoding::encode).collect();
        format!("{}{}", self.base_url, encoded.join("/"))
    }

    /// Render `resolution`, reading concept fields from `index`.
    ///
    /// `index` must be the snapshot the resolution was computed against.
    pub fn render(&self, index: &ConceptIndex, resolution: &Resolution) -> TopicGraph {
        let closure = resolution.closure();
        let members: HashSet<&str> = closure.iter().copied().collect();

        let mut graph = Vec::with_capacity(closure.len() + 1);
        graph.push(GraphNode::DataSource(self.data_source_node()));
        graph.extend(
            closure
                .iter()
                .filter_map(|id| index.get(id))
                .map(|concept| {
                    GraphNode::Topic(self.topic_node(
                        concept,
                        &resolution.language,
                        index.default_language(),
                        &members,
                    ))
                }),
        );

        TopicGraph {
            context: vec![
                ContextEntry::Url(self.context_url.clone()),
                ContextEntry::Base {
                    base: self.base_url.clone(),
                },
            ],
            graph,
        }
    }

    fn data_source_node(&self) -> DataSourceNode {
        DataSourceNode {
            id: self.data_source.id.clone(),
            kind: DATA_SOURCE_TYPE,
            local_identifier: self.data_source.local_identifier.clone(),
            name: self.data_source.name.clone(),
            url: self.data_source.url.clone(),
        }
    }

    fn topic_node(
        &self,
        concept: &Concept,
        language: &str,
        default_language: &str,
        members: &HashSet<&str>,
    ) -> TopicNode {
        TopicNode {
            id: self.topic_uri(&concept.id),
            kind: TOPIC_TYPE,
            local_identifier: concept.id.clone(),
            name: concept.display_name(language, default_language).to_string(),
            source: NodeRef {
                id: self.data_source.id.clone(),
            },
            alternate_name: concept.alternate_labels(language).to_vec(),
            parent_topic: concept
                .parent_id
                .as_deref()
                .filter(|parent| members.contains(parent))
                .map(|parent| ShallowRef {
                    kind: TOPIC_TYPE,
                    local_identifier: parent.to_string(),
                }),
        }
    }
}
