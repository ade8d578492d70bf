// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::gemini::GeminiError;

/// Errors a handler can surface as an HTTP failure status.
///
/// A missing API key is deliberately NOT represented here: the gateway
/// reports it inside a normal 200 response body, not as a transport error.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Error generating response: {0}")]
    Generation(#[from] GeminiError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
