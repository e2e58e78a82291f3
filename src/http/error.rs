//! Error translation.
//!
//! # Responsibilities
//! - Classify store and validation failures at the point of origin
//! - Render every failure kind as status + JSON body in one place
//!
//! # Design Decisions
//! - Handlers return `Result<_, AppError>` and never build error responses
//! - Unclassified failures are logged here and become a generic 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::model::ValidationError;
use crate::store::StoreError;

/// Every failure a handler can produce.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformatted id")]
    MalformedId,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformatted json: {0}")]
    MalformedBody(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("person not found")]
    NotFound,

    #[error("unknown endpoint")]
    UnknownEndpoint,

    /// Anything not classified above.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MalformedId(_) => AppError::MalformedId,
            StoreError::Duplicate { field } => AppError::Validation(ValidationError::NotUnique(field)),
            other => AppError::Store(other),
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedId | AppError::Validation(_) | AppError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound | AppError::UnknownEndpoint => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::NotFound => status.into_response(),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Unhandled store failure");
                let body = ErrorBody {
                    error: "internal server error".to_string(),
                };
                (status, Json(body)).into_response()
            }
            other => {
                tracing::debug!(status = %status, error = %other, "Request rejected");
                (status, Json(ErrorBody { error: other.to_string() })).into_response()
            }
        }
    }
}
