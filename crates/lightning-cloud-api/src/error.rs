//! Cluster API error types

use lightning_cloud::ClusterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Cluster not found: {0}")]
    NotFound(String),

    #[error("Authentication failed ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("Request failed ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ApiError> for ClusterError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound(id) => ClusterError::NotFound(id),
            other => ClusterError::Api(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
