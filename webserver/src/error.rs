//! WebServer-specific error types

use research::ResearchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {message}")]
    ConfigError { message: String },

    #[error("server startup error: {0}")]
    ServerStartup(String),

    #[error("research error: {0}")]
    Research(#[from] ResearchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;
