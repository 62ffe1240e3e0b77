//! Error types for pgeforge-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for pgeforge-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pgeforge-core.
///
/// These are infrastructure failures. User code that fails to compile or
/// link is not an error; the pipeline reports it as a
/// [`BuildOutcome`](crate::pipeline::BuildOutcome) variant instead.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to run a toolchain command.
    #[error("toolchain error: {0}")]
    Toolchain(String),

    /// Failed to create a build workspace.
    #[error("workspace error at {path}: {message}")]
    Workspace { path: PathBuf, message: String },
}
