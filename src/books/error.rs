//! Mapping of handler failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::books::handlers::Message;
use crate::store::StoreError;

/// Every way a book request can fail.
///
/// The `Display` text is exactly what the client sees in `{"message": ...}`.
/// Datastore detail stays in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input")]
    InvalidInput,

    #[error("Invalid book ID")]
    InvalidId,

    #[error("Book not found")]
    NotFound,

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn store(context: &'static str, source: StoreError) -> Self {
        Self::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput | ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store { context, source } => {
                tracing::error!(error = %source, "{}", context);
            }
            other => {
                tracing::debug!(reason = %other, "Rejected request");
            }
        }
        (self.status(), Json(Message::new(self.to_string()))).into_response()
    }
}
