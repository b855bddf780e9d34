//! API error types with IntoResponse
//!
//! Errors that end a request. Duplicate dates never get here: handlers turn
//! them into a re-rendered form.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::views;
use crate::db::DbError;

/// Request-terminating error with HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Record id doesn't exist or isn't an id at all (404)
    NotFound { id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound { id } => (
                StatusCode::NOT_FOUND,
                views::error_page("Not found", &format!("Record {} does not exist.", id)),
            )
                .into_response(),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                internal_error()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        views::error_page("Internal error", "An internal error occurred."),
    )
        .into_response()
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { id } => Self::NotFound { id: id.to_string() },
            _ => Self::Database(e),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON encode error: {}", e),
        }
    }
}
