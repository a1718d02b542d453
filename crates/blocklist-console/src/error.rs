//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Blocklist error: {0}")]
    Blocklist(#[from] blocklist_client::BlocklistError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A console line that could not be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
