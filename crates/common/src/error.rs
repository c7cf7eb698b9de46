//! Error types for chirp.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    /// The `api-key` header was absent from the request.
    #[error("API key missing")]
    MissingApiKey,

    /// The caller may not perform this action (e.g. deleting another
    /// author's tweet).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The addressed user, tweet, or file does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate follow/like, or undoing a follow/like that does not exist.
    ///
    /// Maps to 405 rather than the conventional 409 for wire compatibility
    /// with existing clients.
    #[error("{0}")]
    Conflict(String),

    /// The request itself is malformed or disallowed (bad file name,
    /// self-follow).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A request body failed field validation.
    #[error("Validation error: {0}")]
    Validation(String),

    // === Server Errors ===
    /// A database statement failed.
    #[error("Database error: {0}")]
    Database(String),

    /// The content store failed to read or write a file.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An invariant that should hold was observed broken.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::MissingApiKey | Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,

            // 5xx Server Errors
            Self::Database(_) | Self::Storage(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the stable error code reported in the `error_type` field.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "MISSING_API_KEY",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type();

        // Log server errors
        if self.is_server_error() {
            tracing::error!(error = %self, error_type, "Server error occurred");
        } else {
            tracing::debug!(error = %self, error_type, "Client error occurred");
        }

        // Clients branch on `result`, so error bodies carry it too.
        let body = Json(json!({
            "result": false,
            "error_type": error_type,
            "error_message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
