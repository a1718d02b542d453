//! Blocklist client errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlocklistError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {status} - {body}")]
    Api { status: StatusCode, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl BlocklistError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BlocklistError::Api { status, .. } => Some(*status),
            BlocklistError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            BlocklistError::Http(e) => e.status(),
            _ => None,
        }
    }
}
