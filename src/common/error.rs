use axum::http::StatusCode;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::common::time::now_utc;

// https://github.com/tokio-rs/axum/blob/main/examples/anyhow-error-response/src/main.rs
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        AppError::InvalidRequest(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal(inner) => {
                tracing::error!("request failed: {:#}", inner);
                tracing::debug!("stacktrace: {}", inner.backtrace());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "the request could not be completed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or_default(),
            "message": message,
            "timestamp": now_utc(),
        }));

        (status, body).into_response()
    }
}

// Lets handlers use `?` on anything that converts into `anyhow::Error`.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::Internal(err.into())
    }
}
