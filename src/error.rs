use crate::database::DatabaseError;
use crate::validation::ValidationFailure;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::Error as SqlxError;
use thiserror::Error;
use tracing::error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload rejected by one or more field rules
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    /// Body could not be read as a stock payload
    #[error("{0}")]
    BadRequest(String),

    /// Referenced id has no record
    #[error("{0}")]
    NotFound(String),

    /// Store failures, passed through untouched
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Pool or migration failures
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Not-found error for a stock id, quoting the id as received
    pub fn stock_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Stock not found with id: {}", id))
    }

    /// Check if error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Check if error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Get HTTP status code for the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message) = match &self {
            AppError::Validation(failure) => ("BAD_REQUEST", failure.to_string()),
            AppError::BadRequest(msg) => ("BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            other => {
                error!("Internal error: {:?}", other);
                ("INTERNAL_ERROR", "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Repository-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database query error
    #[error("Query error: {0}")]
    Query(#[from] SqlxError),
}
