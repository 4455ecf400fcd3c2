use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// The scoring engine itself is total and never produces one of these;
/// every variant originates at the request boundary (parsing, persistence,
/// or the external insights service).
#[derive(Debug)]
pub enum AppError {
    /// Database-related errors.
    Database(sqlx::Error),
    /// Resource not found.
    NotFound(String),
    /// Invalid input from the caller.
    BadRequest(String),
    /// The external text-generation service failed or is unavailable.
    Insights(String),
    /// Internal server error.
    Internal(String),
    /// Error wrapped with a context message for debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "database error: {}", e),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            AppError::Insights(msg) => write!(f, "insights service error: {}", msg),
            AppError::Internal(msg) => write!(f, "internal error: {}", msg),
            AppError::WithContext { source, context } => write!(f, "{}: {}", context, source),
        }
    }
}

impl IntoResponse for AppError {
    /// Maps each variant to an HTTP status code and JSON body.
    ///
    /// Server-side failures are logged in full but surfaced to the caller
    /// with a generic message; only 4xx variants echo their detail back.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Insights(msg) => {
                tracing::error!("Insights service error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to generate health insights".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::WithContext { source, context } => {
                tracing::error!("Error with context: {} -> {}", context, source);
                // Delegate to the underlying error's response
                return source.clone().into_response();
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

// Cloneable so WithContext can delegate; sqlx::Error itself is not Clone.
impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Database(_) => AppError::Database(sqlx::Error::RowNotFound),
            AppError::NotFound(msg) => AppError::NotFound(msg.clone()),
            AppError::BadRequest(msg) => AppError::BadRequest(msg.clone()),
            AppError::Insights(msg) => AppError::Insights(msg.clone()),
            AppError::Internal(msg) => AppError::Internal(msg.clone()),
            AppError::WithContext { source, context } => AppError::WithContext {
                source: source.clone(),
                context: context.clone(),
            },
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Insights(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("serialization failed: {}", err))
    }
}

/// Extension trait for attaching context to fallible operations,
/// similar to `anyhow::Context` but producing `AppError`.
pub trait ResultExt<T> {
    /// Add a context message to the error, if any.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }
}

impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::Database(e)),
            context: context.into(),
        })
    }
}
