//! Error types for the pgeforge server.

use thiserror::Error;

/// Server error type.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Build pipeline error.
    #[error("build error: {0}")]
    Core(#[from] pgeforge_core::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured bind address could not be parsed.
    #[error("invalid bind address: {0}")]
    InvalidAddress(String),
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
