use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::ai::AiError;
use crate::services::tts::TtsError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Failed to parse AI evaluation")]
    EvaluationParse,

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Tts(#[from] TtsError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::EvaluationParse => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Ai(AiError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Ai(AiError::QuotaExhausted) => StatusCode::PAYMENT_REQUIRED,
            AppError::Ai(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Tts(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
