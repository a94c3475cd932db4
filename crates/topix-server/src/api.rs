//! Route handlers.
//!
//! Every handler takes one index snapshot up front and uses only that
//! snapshot, so a reload that lands mid-request cannot mix two vocabularies
//! in one response.

use crate::error::ApiError;
use crate::filter::{language_param, SearchRequest, TopicParams};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use topix_core::{QueryError, Resolver, TopicGraph};
use tracing::debug;

/// `GET /api/topics`
pub async fn search_topics(
    State(state): State<AppState>,
    Query(params): Query<TopicParams>,
) -> Result<Json<TopicGraph>, ApiError> {
    let request = SearchRequest::from_params(&params)?;
    let index = state.store.snapshot();
    let language = request
        .language
        .as_deref()
        .unwrap_or_else(|| index.default_language());

    let resolution = Resolver::new(&index, &state.search)
        .resolve_in(&request.term, language)
        .map_err(|err| match err {
            QueryError::InvalidQuery { min_length, .. } => ApiError::Validation {
                param: request.term_param,
                message: format!(
                    "A search term of at least {min_length} characters must be provided."
                ),
                kind: "value_error.any_str.min_length",
            },
            other => ApiError::Query(other),
        })?;

    debug!(
        term = %request.term,
        language,
        matches = resolution.matches.len(),
        "topic search"
    );
    Ok(Json(state.renderer.render(&index, &resolution)))
}

/// `GET /api/topics/{*id}`. The id is a full IRI, so the route captures
/// every remaining path segment.
pub async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<TopicParams>,
) -> Result<Json<TopicGraph>, ApiError> {
    let language = language_param(params.lang.as_deref())?;
    let index = state.store.snapshot();
    let language = language
        .as_deref()
        .unwrap_or_else(|| index.default_language());

    let resolution = Resolver::new(&index, &state.search).lookup(&id, language)?;
    Ok(Json(state.renderer.render(&index, &resolution)))
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    pub concepts: usize,
    pub languages: Vec<String>,
    /// Distinct indexed labels, summed over languages.
    pub labels: usize,
    pub generation: u64,
    pub built_at: DateTime<Utc>,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let index = state.store.snapshot();
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        concepts: index.len(),
        languages: index.languages().map(str::to_string).collect(),
        labels: index.languages().map(|lang| index.label_count(lang)).sum(),
        generation: state.store.generation(),
        built_at: index.built_at(),
    })
}
