// Error types for the activity pipeline.
// Covers transport, HTTP status, body decoding, and cache I/O failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Rate limit of {limit} requests exceeded, resets at {reset_at}")]
    RateLimited { limit: u64, reset_at: String },

    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ActivityError>;
