//! API error responses.
//!
//! # Responsibilities
//! - Map every failure to a status code and a short `{"error": ...}` body
//! - Keep storage details server-side (logged, never returned)
//!
//! # Design Decisions
//! - Client input problems → 400, auth problems → 401/429, infrastructure → 500
//! - A store `NotFound` is a client-visible 404, not an infrastructure failure

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid product data")]
    InvalidPayload,

    #[error("Invalid product id")]
    InvalidId,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Too many attempts. Try again later.")]
    RateLimited,

    #[error("Product not found")]
    NotFound,

    /// `message` is what the client sees; `source` is only logged.
    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("{message}")]
    Internal { message: &'static str, detail: String },
}

impl ApiError {
    /// Classify a store failure for the operation described by `message`.
    pub fn storage(message: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::NotFound(_) => ApiError::NotFound,
            source => ApiError::Storage { message, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload | ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage { message, source } => {
                tracing::error!(error = %source, "{}", message);
            }
            ApiError::Internal { message, detail } => {
                tracing::error!(error = %detail, "{}", message);
            }
            _ => {}
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
