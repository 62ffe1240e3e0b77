//! Wire types for the compile endpoint.
//!
//! The front end parses the `stderr` field of failure bodies with the same
//! patterns it uses for real toolchain output, so locally produced
//! diagnostics ride in the exact same shape as compiler output.

use serde::{Deserialize, Serialize};

/// Body of a `POST /compile` request.
#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    /// Full C++ source as a single string.
    pub code: Option<String>,
}

/// Successful build: the self-contained runnable document.
#[derive(Debug, Serialize)]
pub struct CompileSuccess {
    pub html: String,
}

/// Request rejected before any toolchain stage ran.
#[derive(Debug, Serialize)]
pub struct Rejection {
    pub code: u16,
    pub message: String,
    pub stdout: String,
    pub stderr: String,
}

impl Rejection {
    /// The request body lacked the required `code` field.
    pub fn missing_parameters() -> Self {
        Self {
            code: 400,
            message: "missing required parameters".to_string(),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Sanitization violations, newline-joined into the stderr field.
    pub fn sanitization(diagnostics: &[String]) -> Self {
        Self {
            code: 400,
            message: "source rejected".to_string(),
            stdout: String::new(),
            stderr: diagnostics.join("\n"),
        }
    }
}

/// A toolchain stage exited non-zero; captured output passes through
/// verbatim.
#[derive(Debug, Serialize)]
pub struct StageFailure {
    pub error: StageError,
    pub stdout: String,
    pub stderr: String,
}

/// Description of the stage that failed.
#[derive(Debug, Serialize)]
pub struct StageError {
    pub stage: &'static str,
    pub message: String,
}

impl StageFailure {
    pub fn new(stage: &'static str, stdout: String, stderr: String) -> Self {
        Self {
            error: StageError {
                stage,
                message: format!("{} stage exited with an error", stage),
            },
            stdout,
            stderr,
        }
    }
}
