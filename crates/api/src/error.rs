use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use opencrochet_core::error::CoreError;
use opencrochet_core::import::{summarize, ImportError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`ImportError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `opencrochet_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed CSV import.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured upload limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::NotFound { entity, key }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} '{key}' not found"),
            ),

            // --- Import failures ---
            AppError::Import(import) => match import {
                ImportError::InvalidFile(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_FILE", import.to_string())
                }
                ImportError::Parse(_) => {
                    (StatusCode::BAD_REQUEST, "PARSE_ERROR", import.to_string())
                }
                ImportError::Validation(errors) => {
                    return validation_response(import.to_string(), errors);
                }
                ImportError::Upload(_) => {
                    (StatusCode::BAD_GATEWAY, "UPLOAD_ERROR", import.to_string())
                }
                ImportError::InProgress => {
                    (StatusCode::CONFLICT, "IMPORT_IN_PROGRESS", import.to_string())
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 422 body listing every row error plus the capped display summary.
fn validation_response(
    message: String,
    errors: &[opencrochet_core::import::ValidationError],
) -> Response {
    let all: Vec<String> = errors.iter().map(ToString::to_string).collect();
    let body = json!({
        "error": message,
        "code": "VALIDATION_ERROR",
        "errors": all,
        "summary": summarize(errors),
    });

    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
}
