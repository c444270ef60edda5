//! Research error types

use thiserror::Error;

/// Failure modes for upstream AI provider requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limit exceeded")]
    RateLimitExceeded,

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("server error: {0}")]
    ServerError(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for research operations
pub type ResearchResult<T> = Result<T, ResearchError>;

/// Research error types
#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("configuration error: {message}")]
    ConfigError { message: String },

    #[error("offers source error: {message}")]
    OffersSourceError { message: String },

    #[error("provider request failed: {0}")]
    Provider(#[from] ApiFailure),

    #[error("run store error: {message}")]
    StoreError { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
