use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Interpreter error: {0}")]
    Interpreter(String),

    #[error("No interpreter configured")]
    InterpreterUnavailable,

    #[error("No eligible candidate for stop {slot} ({category})")]
    NoEligibleCandidate { slot: usize, category: String },
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(ref e) => (StatusCode::UNPROCESSABLE_ENTITY, e.clone()),
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::Snapshot(ref e) => {
                tracing::error!("Snapshot error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Snapshot unavailable".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal I/O error".to_string(),
                )
            }
            AppError::Interpreter(ref e) => {
                tracing::warn!("Interpreter error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Query interpretation service error".to_string(),
                )
            }
            AppError::InterpreterUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Free-text queries are not enabled".to_string(),
            ),
            AppError::NoEligibleCandidate { .. } => {
                tracing::info!("{}", self);
                (StatusCode::NOT_FOUND, self.to_string())
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
