//! Query-string parsing for `GET /api/topics`.
//!
//! Two spellings are accepted:
//!
//! ```text
//! ?q=poverty&lang=de
//! ?filter=cf.search.labels:poverty,cf.search.language:de
//! ```
//!
//! When both are present the `filter` entries win.

use crate::error::ApiError;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

const LABELS_KEY: &str = "cf.search.labels";
const LANGUAGE_KEY: &str = "cf.search.language";

static LANGUAGE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z]{2}$").expect("language code pattern is valid"));

/// Raw query parameters of the topic routes.
#[derive(Debug, Default, Deserialize)]
pub struct TopicParams {
    pub q: Option<String>,
    pub filter: Option<String>,
    pub lang: Option<String>,
}

/// A validated search request. Term length is checked later, by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    /// `None` means the index's default language.
    pub language: Option<String>,
    /// Parameter the term came from, for error locations.
    pub term_param: &'static str,
}

impl SearchRequest {
    pub fn from_params(params: &TopicParams) -> Result<Self, ApiError> {
        let mut term = params.q.clone().map(|term| (term, "q"));
        let mut language = params.lang.clone().map(|lang| (lang, "lang"));

        if let Some(filter) = &params.filter {
            for (key, value) in parse_filter(filter)? {
                match key {
                    LABELS_KEY => term = Some((value.to_string(), "filter")),
                    LANGUAGE_KEY => language = Some((value.to_string(), "filter")),
                    _ => {}
                }
            }
        }

        let (term, term_param) = term
            .filter(|(term, _)| !term.trim().is_empty())
            .ok_or_else(|| ApiError::Validation {
                param: if params.filter.is_some() { "filter" } else { "q" },
                message: format!(
                    "A search term must be provided, either as 'q' or as a '{LABELS_KEY}' filter key."
                ),
                kind: "value_error.missing",
            })?;

        let language = language
            .map(|(language, param)| validate_language(language, param))
            .transpose()?;

        Ok(Self {
            term,
            language,
            term_param,
        })
    }
}

/// Validate an optional language parameter on its own (topic lookup route).
pub fn language_param(lang: Option<&str>) -> Result<Option<String>, ApiError> {
    lang.map(|lang| validate_language(lang.to_string(), "lang"))
        .transpose()
}

fn validate_language(language: String, param: &'static str) -> Result<String, ApiError> {
    if LANGUAGE_CODE.is_match(&language) {
        Ok(language)
    } else {
        Err(ApiError::Validation {
            param,
            message: "The search language must be a 2-letter ISO 639-1 code.".to_string(),
            kind: "value_error.pattern",
        })
    }
}

/// Split `key:value,key:value`. Keys and values are trimmed; a part without
/// a colon is malformed.
fn parse_filter(filter: &str) -> Result<Vec<(&str, &str)>, ApiError> {
    filter
        .split(',')
        .map(|part| {
            part.split_once(':')
                .map(|(key, value)| (key.trim(), value.trim()))
                .ok_or_else(|| ApiError::Validation {
                    param: "filter",
                    message: "Filter parameter is malformed. Expected format: 'key1:value1,key2:value2'."
                        .to_string(),
                    kind: "value_error.format",
                })
        })
        .collect()
}
