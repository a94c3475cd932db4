use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use topix_core::{Config, ConceptIndex, GraphRenderer, Resolver, VocabularyStore};

#[derive(Parser)]
#[command(name = "topix", about = "Topic autocomplete over a SKOS thesaurus export")]
struct Cli {
    /// Log at debug level (RUST_LOG still wins when set).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file; defaults to ./topix.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Vocabulary export, overriding `vocabulary.path`.
        #[arg(long)]
        data: Option<PathBuf>,
        /// Listen address, overriding `server.bind`.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Resolve one term and print the topic graph.
    Query {
        term: String,
        #[arg(long)]
        lang: Option<String>,
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Load the vocabulary, check its hierarchy and print a summary.
    Check {
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.debug { "debug" } else { "info" })
            }),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "topix starting");

    match cli.command {
        Command::Serve { data, bind } => {
            if let Some(data) = data {
                config.vocabulary.path = data;
            }
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            let store = VocabularyStore::open(&config.vocabulary.path, config.index_options())
                .with_context(|| {
                    format!("failed to load {}", config.vocabulary.path.display())
                })?;
            tokio::runtime::Runtime::new()?
                .block_on(topix_server::serve(&config, Arc::new(store)))
        }
        Command::Query { term, lang, data } => {
            let index = load_index(&config, data)?;
            let resolver = Resolver::new(&index, &config.search);
            let resolution = match lang {
                Some(lang) => resolver.resolve_in(&term, &lang.to_ascii_lowercase())?,
                None => resolver.resolve(&term)?,
            };
            let graph = GraphRenderer::from_config(&config).render(&index, &resolution);
            println!("{}", graph.to_json_pretty()?);
            Ok(())
        }
        Command::Check { data } => {
            let path = data_path(&config, data);
            let (_, report) = ConceptIndex::load_with_report(&path, &config.index_options())
                .with_context(|| format!("failed to load {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn data_path(config: &Config, data: Option<PathBuf>) -> PathBuf {
    data.unwrap_or_else(|| config.vocabulary.path.clone())
}

fn load_index(config: &Config, data: Option<PathBuf>) -> anyhow::Result<ConceptIndex> {
    let path = data_path(config, data);
    ConceptIndex::load(&path, &config.index_options())
        .with_context(|| format!("failed to load {}", path.display()))
}
