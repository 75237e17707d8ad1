//! Server error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Unknown compliance step: {0}")]
    UnknownStep(String),

    #[error("Merchant not found")]
    MerchantNotFound,

    /// Fixture or upstream data could not be served; carries the generic
    /// client-facing message, detail is logged at the failure site
    #[error("{0}")]
    DataUnavailable(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<paydash_core::Error> for ServerError {
    fn from(err: paydash_core::Error) -> Self {
        match err {
            paydash_core::Error::UnknownStep(step) => ServerError::UnknownStep(step),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::NotAuthenticated => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            ServerError::UnknownStep(step) => (
                StatusCode::NOT_FOUND,
                format!("Unknown compliance step: {}", step),
            ),
            ServerError::MerchantNotFound => {
                (StatusCode::NOT_FOUND, "Merchant not found".to_string())
            }
            ServerError::DataUnavailable(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, (*msg).to_string())
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
