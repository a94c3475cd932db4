//! Static vocabulary exports used across harnesses.
//!
//! Every fixture is a complete JSON-LD document in the shape the thesaurus
//! publisher emits: expanded SKOS IRIs, language-tagged literals, and a
//! `ConceptScheme` node that the parser must skip.

/// Small poverty hierarchy.
///
/// ```text
/// c1 SOCIAL PROBLEMS
/// └── c2 POVERTY (alt: destitution; de: ARMUT)
///     ├── c3 EXTREME POVERTY
///     └── c5 CHILD POVERTY
/// c4 WEALTH
/// http://purl.org/elsst/4/es/368 HOUSING
/// ```
pub const POVERTY_EXPORT: &str = r##"{
  "@context": { "skos": "http://www.w3.org/2004/02/skos/core#" },
  "@graph": [
    {
      "@id": "https://elsst.cessda.eu/id/5/scheme",
      "@type": ["http://www.w3.org/2004/02/skos/core#ConceptScheme"]
    },
    {
      "@id": "c1",
      "@type": ["http://www.w3.org/2004/02/skos/core#Concept"],
      "http://www.w3.org/2004/02/skos/core#prefLabel": [
        { "@value": "SOCIAL PROBLEMS", "@language": "en" },
        { "@value": "SOZIALE PROBLEME", "@language": "de" }
      ]
    },
    {
      "@id": "c2",
      "@type": ["http://www.w3.org/2004/02/skos/core#Concept"],
      "http://www.w3.org/2004/02/skos/core#prefLabel": [
        { "@value": "POVERTY", "@language": "en" },
        { "@value": "ARMUT", "@language": "de" }
      ],
      "http://www.w3.org/2004/02/skos/core#altLabel": [
        { "@value": "destitution", "@language": "en" }
      ],
      "http://www.w3.org/2004/02/skos/core#broader": [{ "@id": "c1" }]
    },
    {
      "@id": "c3",
      "@type": ["http://www.w3.org/2004/02/skos/core#Concept"],
      "http://www.w3.org/2004/02/skos/core#prefLabel": [
        { "@value": "EXTREME POVERTY", "@language": "en" }
      ],
      "http://www.w3.org/2004/02/skos/core#broader": [{ "@id": "c2" }]
    },
    {
      "@id": "c4",
      "@type": ["http://www.w3.org/2004/02/skos/core#Concept"],
      "http://www.w3.org/2004/02/skos/core#prefLabel": [
        { "@value": "WEALTH", "@language": "en" }
      ]
    },
    {
      "@id": "c5",
      "@type": ["http://www.w3.org/2004/02/skos/core#Concept"],
      "http://www.w3.org/2004/02/skos/core#prefLabel": [
        { "@value": "CHILD POVERTY", "@language": "en" }
      ],
      "http://www.w3.org/2004/02/skos/core#broader": [{ "@id": "c2" }]
    },
    {
      "@id": "http://purl.org/elsst/4/es/368",
      "@type": ["http://www.w3.org/2004/02/skos/core#Concept"],
      "http://www.w3.org/2004/02/skos/core#prefLabel": [
        { "@value": "HOUSING", "@language": "en" }
      ]
    }
  ]
}"##;

/// Ids of [`POVERTY_EXPORT`] concepts, in table order.
pub const POVERTY_IDS: &[&str] = &["c1", "c2", "c3", "c4", "c5", "http://purl.org/elsst/4/es/368"];

/// `a` and `b` name each other as broader.
pub const CYCLIC_EXPORT: &str = r#"{
  "@graph": [
    { "@id": "a", "@type": "skos:Concept", "skos:prefLabel": "ALPHA", "skos:broader": "b" },
    { "@id": "b", "@type": "skos:Concept", "skos:prefLabel": "BETA", "skos:broader": "a" }
  ]
}"#;

/// `child` names a broader concept the export does not contain.
pub const DANGLING_EXPORT: &str = r#"{
  "@graph": [
    { "@id": "child", "@type": "skos:Concept", "skos:prefLabel": "ORPHANED TOPIC", "skos:broader": "gone" }
  ]
}"#;

/// Two nodes share one id.
pub const DUPLICATE_EXPORT: &str = r#"{
  "@graph": [
    { "@id": "dup", "@type": "skos:Concept", "skos:prefLabel": "FIRST" },
    { "@id": "dup", "@type": "skos:Concept", "skos:prefLabel": "SECOND" }
  ]
}"#;

/// A concept node without any preferred label.
pub const UNLABELLED_EXPORT: &str = r#"{
  "@graph": [
    { "@id": "bare", "@type": "skos:Concept", "skos:altLabel": "only an alternate" }
  ]
}"#;
