//! Error types for paydash-core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown compliance step: {0}")]
    UnknownStep(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
