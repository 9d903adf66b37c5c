use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use leadrelay_core::validation::ValidationResult;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{ success: false, error, code }`
/// envelopes with the matching status code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Payload failed its rule set.
    #[error(transparent)]
    Validation(#[from] ValidationResult),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A collaborator call failed. `context` is the caller-facing summary,
    /// `message` the error's display text.
    #[error("{context}: {message}")]
    Upstream {
        context: &'static str,
        message: String,
    },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Wrap a collaborator failure under a caller-facing summary.
    pub fn upstream(context: &'static str, err: impl std::fmt::Display) -> Self {
        AppError::Upstream {
            context,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(result) => {
                let error = result
                    .first()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "Invalid request".to_string());
                tracing::debug!(%error, "Rejected invalid payload");
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "success": false,
                        "error": error,
                        "code": "VALIDATION_ERROR",
                        "violations": result.violations,
                    }),
                )
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({"success": false, "error": msg, "code": "BAD_REQUEST"}),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({"success": false, "error": msg, "code": "NOT_FOUND"}),
            ),
            AppError::Upstream { context, message } => {
                tracing::error!(error = %message, "{context}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "error": context,
                        "message": message,
                        "code": "UPSTREAM_ERROR",
                    }),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "error": "An internal error occurred",
                        "code": "INTERNAL_ERROR",
                    }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
