use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use filler::FillError;
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Fill error: {0}")]
    Fill(FillError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<FillError> for AppError {
    fn from(err: FillError) -> Self {
        match err {
            FillError::InvalidRequest(msg) => AppError::InvalidRequest(msg),
            other => AppError::Fill(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Fill(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::InvalidRequest(msg) => msg.clone(),
            AppError::NotFound(_) => "File not found".to_string(),
            AppError::Fill(e) => {
                tracing::error!("Fill error: {e}");
                "Failed to generate PDF".to_string()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                "Failed to store generated PDF".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}
