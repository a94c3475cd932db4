//! topix-server: HTTP query surface over a shared [`VocabularyStore`].
//!
//! ```text
//! GET /api/topics?q=<term>&lang=<xx>
//! GET /api/topics?filter=cf.search.labels:<term>,cf.search.language:<xx>
//! GET /api/topics/{id}
//! GET /health
//! ```

pub mod api;
pub mod error;
pub mod filter;
pub mod watch;

use anyhow::Context;
use axum::{routing::get, Router};
use std::sync::Arc;
use topix_core::{config::SearchConfig, Config, GraphRenderer, VocabularyStore};
use tracing::info;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<VocabularyStore>,
    pub renderer: Arc<GraphRenderer>,
    pub search: SearchConfig,
}

impl AppState {
    pub fn new(store: Arc<VocabularyStore>, config: &Config) -> Self {
        Self {
            store,
            renderer: Arc::new(GraphRenderer::from_config(config)),
            search: config.search.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/topics", get(api::search_topics))
        .route("/api/topics/{*id}", get(api::get_topic))
        .route("/health", get(api::health))
        .with_state(state)
}

/// Serve until ctrl-c. The store must already be loaded; a vocabulary that
/// fails to load never gets as far as binding a socket.
pub async fn serve(config: &Config, store: Arc<VocabularyStore>) -> anyhow::Result<()> {
    let _watcher = if config.vocabulary.watch {
        Some(watch::watch(Arc::clone(&store)).context("failed to watch the vocabulary file")?)
    } else {
        None
    };

    let app = router(AppState::new(store, config));
    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
