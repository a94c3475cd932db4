//! HTTP error mapping.
//!
//! Client input problems answer 422 with a FastAPI-style `detail` array so
//! existing autocomplete widgets keep parsing them; unknown topics answer 404;
//! an inconsistent hierarchy met at query time is the only 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use topix_core::QueryError;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A query parameter failed validation.
    #[error("{message}")]
    Validation {
        param: &'static str,
        message: String,
        kind: &'static str,
    },

    #[error(transparent)]
    Query(#[from] QueryError),
}

#[derive(Serialize)]
struct ErrorBody<T> {
    detail: T,
}

#[derive(Serialize)]
struct ValidationDetail {
    loc: [&'static str; 2],
    msg: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation {
                param,
                message,
                kind,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    detail: [ValidationDetail {
                        loc: ["query", param],
                        msg: message,
                        kind,
                    }],
                }),
            )
                .into_response(),
            ApiError::Query(QueryError::InvalidQuery { min_length, .. }) => ApiError::Validation {
                param: "q",
                message: format!("A search term of at least {min_length} characters must be provided."),
                kind: "value_error.any_str.min_length",
            }
            .into_response(),
            ApiError::Query(QueryError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    detail: format!("Topic with ID '{id}' not found."),
                }),
            )
                .into_response(),
            ApiError::Query(QueryError::Consistency(err)) => {
                error!(error = %err, "vocabulary hierarchy is inconsistent");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        detail: "vocabulary hierarchy is inconsistent".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
