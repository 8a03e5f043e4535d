//! API error types with IntoResponse
//!
//! Every failure renders as `{"error": "<message>"}`. Only "not found" is
//! distinguished; everything else is a 500 with the endpoint's fixed message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found (404)
    NotFound { message: &'static str },

    /// Any other failure (500). `cause` is logged, never returned.
    Failed {
        message: &'static str,
        cause: String,
    },
}

impl ApiError {
    pub fn failed(message: &'static str, cause: impl std::fmt::Display) -> Self {
        Self::Failed {
            message,
            cause: cause.to_string(),
        }
    }

    /// Classify a repository error for an endpoint.
    pub fn from_db(err: DbError, failure: &'static str) -> Self {
        match err {
            DbError::NotFound { resource, .. } => Self::NotFound {
                message: not_found_message(resource),
            },
            DbError::Sqlx(e) => Self::failed(failure, e),
        }
    }
}

fn not_found_message(resource: &str) -> &'static str {
    match resource {
        "order" => "Order not found",
        _ => "Not found",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound { message } => (StatusCode::NOT_FOUND, message),
            Self::Failed { message, cause } => {
                // Log the actual error, return the fixed message
                tracing::error!(%cause, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Attach an endpoint's failure message to repository results.
pub trait DbResultExt<T> {
    fn or_fail(self, failure: &'static str) -> Result<T, ApiError>;
}

impl<T> DbResultExt<T> for Result<T, DbError> {
    fn or_fail(self, failure: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_db(e, failure))
    }
}
