//! API error taxonomy

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors a handler can return. Every variant renders as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required body field is absent or null
    #[error("{0} is required")]
    MissingField(String),
    /// The body or a field failed validation
    #[error("{0}")]
    Invalid(String),
    /// No record with the addressed id
    #[error("not found")]
    NotFound,
    /// Anything unexpected; the message is logged, never returned
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Shorthand for a missing-field error
    pub fn missing(field: &str) -> Self {
        ApiError::MissingField(field.to_string())
    }

    /// Shorthand for a validation error
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!("internal error: {}", detail);
                "internal server error".to_string()
            }
            other => {
                tracing::debug!(status = status.as_u16(), "request rejected: {}", other);
                other.to_string()
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Invalid(format!("invalid request body: {err}"))
    }
}

/// Result alias used by handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::missing("name").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::invalid("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_field_message() {
        assert_eq!(ApiError::missing("reason").to_string(), "reason is required");
    }
}
