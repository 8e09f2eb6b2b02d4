use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation_client::GenerationError;
use crate::models::generation::RequestError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] RequestError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Superseded by a newer request")]
    Superseded,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            AppError::Validation(e) => {
                let body = error_body("VALIDATION_ERROR", e.to_string());
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                let body = Json(json!({
                    "error": {
                        "code": "GENERATION_FAILED",
                        "message": e.message(),
                        "status_code": e.status_code()
                    }
                }));
                (StatusCode::BAD_GATEWAY, body)
            }
            AppError::Superseded => {
                let body = error_body(
                    "SUPERSEDED",
                    "A newer request for this session replaced this one".to_string(),
                );
                (StatusCode::CONFLICT, body)
            }
        };

        body.into_response()
    }
}

fn error_body(code: &str, message: String) -> Json<serde_json::Value> {
    Json(json!({
        "error": {
            "code": code,
            "message": message
        }
    }))
}
