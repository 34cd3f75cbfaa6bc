//! Request-level errors and their HTTP mapping.
//!
//! Every failure is reported as `{"error": "<text>"}` with the status below.

use crate::domain::PaginationError;
use crate::transport::http::types::ErrorResponse;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid ID format")]
    InvalidId,

    #[error(transparent)]
    InvalidPagination(#[from] PaginationError),

    /// Review body could not be decoded.
    #[error("{0}")]
    InvalidBody(String),

    /// An extractor refused the request; keeps the extractor's status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Failed to fetch products: {0}")]
    ListFailed(anyhow::Error),

    #[error("Internal Server Error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::InvalidPagination(_) => StatusCode::BAD_REQUEST,
            Self::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ListFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::ListFailed(err) => tracing::error!(error = ?err, "Error fetching products"),
            Self::Internal(err) => tracing::error!(error = ?err, "Request failed"),
            _ => tracing::debug!(error = %self, "Request rejected"),
        }

        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
