use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The places provider answered with a status other than `OK` or `ZERO_RESULTS`.
    UpstreamSearch {
        /// Provider status string (e.g. `OVER_QUERY_LIMIT`).
        status: String,
        /// Optional `error_message` returned alongside the status.
        message: Option<String>,
    },
    /// The provider response body was absent or could not be parsed.
    MalformedResponse(String),
    /// Transport failure or non-2xx HTTP status from an external API.
    ExternalApi(String),
    /// Any failure reported by the lead store.
    Storage(String),
    /// Error with context chain for better debugging.
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
            AppError::UpstreamSearch { status, message } => match message {
                Some(msg) if !msg.is_empty() => {
                    write!(f, "Places API error: {} - {}", status, msg)
                }
                _ => write!(f, "Places API error: {}", status),
            },
            AppError::MalformedResponse(msg) => write!(f, "Invalid API response: {}", msg),
            AppError::ExternalApi(msg) => write!(f, "External API error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// HTTP status used when the error reaches a route.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UpstreamSearch { .. } | AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedResponse(_) | AppError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::WithContext { source, .. } => source.status_code(),
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into the `{success: false, error}` envelope shared by all routes.
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
            }
            AppError::WithContext { source, context } => {
                // Log full context chain for debugging
                tracing::error!("Error with context: {} -> {}", context, source);
            }
            other => {
                tracing::error!("{}", other);
            }
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApi(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
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

/// Extension for sqlx::Error to add context
impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::from(e)),
            context: context.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_carries_status_and_message() {
        let err = AppError::UpstreamSearch {
            status: "REQUEST_DENIED".to_string(),
            message: Some("The provided API key is invalid.".to_string()),
        };
        let text = err.to_string();
        assert!(text.contains("REQUEST_DENIED"));
        assert!(text.contains("The provided API key is invalid."));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn context_wraps_and_keeps_status() {
        let res: Result<(), AppError> = Err(AppError::Storage("connection reset".to_string()));
        let err = res.context("Failed to save leads").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to save leads: Storage error: connection reset"
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
