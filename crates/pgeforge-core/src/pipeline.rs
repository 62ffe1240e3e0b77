//! The build pipeline.
//!
//! Composes sanitization, library resolution, the workspace lifecycle and
//! the two toolchain stages into one request-scoped build, then classifies
//! the result. The pipeline holds no per-request state; each call owns its
//! workspace and removes it before returning, whatever the outcome.

use crate::error::Result;
use crate::invoke::BuildInvoker;
use crate::library;
use crate::sanitize::SourceSanitizer;
use crate::workspace::{BuildRoot, Workspace};

/// Classified result of one build request.
#[derive(Debug)]
pub enum BuildOutcome {
    /// Both stages exited zero and the artifact exists.
    Success {
        /// Full text of the self-contained runnable document.
        html: String,
    },
    /// Sanitization found violations; no toolchain stage ran.
    Rejected { diagnostics: Vec<String> },
    /// Compile stage exited non-zero.
    CompileFailed { stdout: String, stderr: String },
    /// Link stage exited non-zero.
    LinkFailed { stdout: String, stderr: String },
    /// Link exited zero but produced no artifact. A toolchain
    /// misconfiguration, not a user code error.
    ArtifactMissing,
}

/// Stateless request-to-outcome build driver.
pub struct BuildPipeline {
    sanitizer: SourceSanitizer,
    build_root: BuildRoot,
    invoker: BuildInvoker,
}

impl BuildPipeline {
    pub fn new(build_root: BuildRoot, invoker: BuildInvoker) -> Self {
        Self {
            sanitizer: SourceSanitizer::new(),
            build_root,
            invoker,
        }
    }

    /// Run one submission through the full pipeline.
    ///
    /// A workspace is only created once sanitization passes, and is removed
    /// on every path out of the toolchain stages.
    pub async fn build(&self, code: &str) -> Result<BuildOutcome> {
        let sanitized = self.sanitizer.sanitize(code);
        if sanitized.is_rejected() {
            return Ok(BuildOutcome::Rejected {
                diagnostics: sanitized.diagnostics,
            });
        }

        let objects = library::resolve_objects(&sanitized.libraries);
        let workspace = self.build_root.create_workspace()?;

        let outcome = self
            .run_stages(&workspace, &sanitized.text, &objects)
            .await;
        workspace.cleanup();
        outcome
    }

    async fn run_stages(
        &self,
        workspace: &Workspace,
        source: &str,
        objects: &[&str],
    ) -> Result<BuildOutcome> {
        let compiled = self.invoker.compile(workspace, source).await?;
        if !compiled.success {
            return Ok(BuildOutcome::CompileFailed {
                stdout: compiled.stdout,
                stderr: compiled.stderr,
            });
        }

        let linked = self.invoker.link(workspace, objects).await?;
        if !linked.success {
            return Ok(BuildOutcome::LinkFailed {
                stdout: linked.stdout,
                stderr: linked.stderr,
            });
        }

        // A zero exit does not guarantee the toolchain wrote its output.
        match tokio::fs::read_to_string(workspace.artifact_path()).await {
            Ok(html) => Ok(BuildOutcome::Success { html }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!(
                    "link exited zero but {} is missing",
                    workspace.artifact_path().display()
                );
                Ok(BuildOutcome::ArtifactMissing)
            }
            Err(e) => Err(e.into()),
        }
    }
}
