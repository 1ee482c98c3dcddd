//! Error handling and custom error types for the API
//!
//! Every failure is value-level and scoped to a single request. The
//! `IntoResponse` impl is the only place errors become transport-visible.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Main API error type that encompasses all possible errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// A min bound exceeds its paired max bound
    #[error("{min} cannot be greater than {max}")]
    InvalidRange {
        min: &'static str,
        max: &'static str,
    },

    /// Sort direction is not asc or desc
    #[error("sort_dir must be asc or desc")]
    InvalidSortDirection,

    /// Sort key is not one of the sortable fields
    #[error("sort_by must be one of: price, quantity, date")]
    InvalidSortKey,

    /// Page number below 1
    #[error("page must be >= 1")]
    InvalidPage,

    /// Page size outside 1..=100
    #[error("page_size must be between 1 and 100")]
    InvalidPageSize,

    /// Malformed field in a request payload
    #[error("{0}")]
    InvalidField(String),

    /// Referenced entity absent
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Missing, invalid, or expired identity token
    #[error("{message}")]
    Auth { message: String },

    /// Error from the storage layer
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl ApiError {
    /// Create an authentication error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRange { .. }
            | Self::InvalidSortDirection
            | Self::InvalidSortKey
            | Self::InvalidPage
            | Self::InvalidPageSize
            | Self::InvalidField(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Auth { .. } => StatusCode::UNAUTHORIZED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structured error body returned to clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Database(e) => tracing::error!("database error: {}", e),
            ApiError::Auth { message } => tracing::warn!("authentication failed: {}", message),
            _ => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Convenience alias for handler and service results
pub type ApiResult<T> = Result<T, ApiError>;
