//! Core build pipeline for pgeforge.
//!
//! This crate provides:
//! - Source sanitization (include filtering, library macro extraction)
//! - The engine library catalog (macro name → prebuilt object file)
//! - Build workspace lifecycle (per-request directories under a cache root)
//! - External toolchain invocation (compile stage, then link stage)
//! - The pipeline composing all of the above into one build per request

pub mod error;
pub mod invoke;
pub mod library;
pub mod pipeline;
pub mod sanitize;
pub mod workspace;

pub use error::{Error, Result};
pub use invoke::{BuildInvoker, CommandRunner, StageOutput, SystemRunner, ToolchainConfig};
pub use library::Library;
pub use pipeline::{BuildOutcome, BuildPipeline};
pub use sanitize::{Sanitized, SourceSanitizer};
pub use workspace::{BuildRoot, Workspace};
