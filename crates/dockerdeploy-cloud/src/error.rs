//! Deployment API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error(
        "API token not configured. Set DOCKERDEPLOY_API_TOKEN or run `dockerdeploy config set-token <TOKEN>`"
    )]
    MissingToken,

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
