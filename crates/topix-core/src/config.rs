//! Configuration types for topix.
//!
//! [`Config::load`] layers, in order: the embedded defaults, an optional TOML
//! file (the `--config` path, or `topix.toml` in the working directory), and
//! `TOPIX__<SECTION>__<KEY>` environment variables. [`Config::defaults`]
//! returns the embedded defaults without touching the filesystem (useful in
//! tests).

use crate::index::{DanglingParentPolicy, IndexOptions};
use crate::types::DataSource;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[vocabulary]
path             = "data/elsst_current.jsonld"
default_language = "en"
dangling_parents = "truncate"
watch            = false

[search]
min_term_length = 3

[data_source]
id               = "urn:cessda:elsst-v5"
local_identifier = "elsst-v5"
name             = "European Language Social Science Thesaurus (ELSST) - Version 5"
url              = "https://thesauri.cessda.eu/elsst-5/en/"

[output]
base_url    = "https://w3id.org/skg-if/sandbox/cessda-elsst/"
context_url = "https://w3id.org/skg-if/context/skg-if.json"

[server]
bind = "0.0.0.0:8000"
"#;

/// Config file picked up from the working directory when no path is given.
const LOCAL_CONFIG: &str = "topix";

const ENV_PREFIX: &str = "TOPIX";
const ENV_SEPARATOR: &str = "__";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub vocabulary: VocabularyConfig,
    pub search: SearchConfig,
    pub data_source: DataSource,
    pub output: OutputConfig,
    pub server: ServerConfig,
}

/// `[vocabulary]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct VocabularyConfig {
    /// SKOS JSON-LD export to load at startup.
    pub path: PathBuf,
    /// Language used when a query names none, and for untagged labels.
    pub default_language: String,
    pub dangling_parents: DanglingParentPolicy,
    /// Reload the index when the export file changes on disk.
    pub watch: bool,
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub min_term_length: usize,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Prefix of every rendered topic `@id`; also the graph's `@base`.
    pub base_url: String,
    pub context_url: String,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. An explicit `path` must exist; the
    /// working-directory `topix.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(LOCAL_CONFIG).required(false),
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Index construction options derived from `[vocabulary]`.
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            default_language: self.vocabulary.default_language.to_ascii_lowercase(),
            dangling_parents: self.vocabulary.dangling_parents,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
