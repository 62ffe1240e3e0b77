//! External toolchain invocation.
//!
//! The compiler and linker are black-box scripts selected by configuration.
//! The invoker runs them against a workspace and captures exit status plus
//! both output streams in full. Process execution sits behind the
//! [`CommandRunner`] trait so the pipeline can be driven by a fake runner in
//! tests.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::workspace::Workspace;

/// Captured result of one toolchain stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    /// Whether the process exited zero.
    pub success: bool,
    /// Full stdout, lossily decoded.
    pub stdout: String,
    /// Full stderr, lossily decoded.
    pub stderr: String,
}

/// Runs an external command and captures its output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[String], cwd: &Path) -> Result<StageOutput>;
}

/// [`CommandRunner`] backed by real child processes.
///
/// `output()` drains stdout and stderr concurrently, so a stage that floods
/// one stream cannot deadlock against a full pipe on the other.
#[derive(Debug, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[String], cwd: &Path) -> Result<StageOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                Error::Toolchain(format!("failed to run {}: {}", program.display(), e))
            })?;

        Ok(StageOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Which build scripts to invoke and where they run.
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    /// Directory containing the `<toolchain>-compile.sh` /
    /// `<toolchain>-link.sh` script pair.
    pub scripts_dir: PathBuf,
    /// Script set selector, e.g. `emscripten`.
    pub toolchain: String,
    /// Directory the scripts are run from. Script-relative resources
    /// (engine headers, prebuilt objects) resolve against this.
    pub base_dir: PathBuf,
}

impl ToolchainConfig {
    pub fn new(scripts_dir: impl Into<PathBuf>, toolchain: impl Into<String>) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
            toolchain: toolchain.into(),
            base_dir: PathBuf::from("."),
        }
    }

    /// Path of the compile-stage script.
    pub fn compile_script(&self) -> PathBuf {
        self.scripts_dir
            .join(format!("{}-compile.sh", self.toolchain))
    }

    /// Path of the link-stage script.
    pub fn link_script(&self) -> PathBuf {
        self.scripts_dir.join(format!("{}-link.sh", self.toolchain))
    }
}

/// Two-stage build driver: compile, then link.
///
/// Neither stage is retried; a non-zero exit is final for the request.
pub struct BuildInvoker {
    runner: Arc<dyn CommandRunner>,
    config: ToolchainConfig,
}

impl BuildInvoker {
    pub fn new(runner: Arc<dyn CommandRunner>, config: ToolchainConfig) -> Self {
        Self { runner, config }
    }

    /// Write the sanitized source into the workspace, then run the compile
    /// script with the workspace directory as its argument.
    pub async fn compile(&self, workspace: &Workspace, source: &str) -> Result<StageOutput> {
        tokio::fs::write(workspace.source_path(), source).await?;

        let args = vec![workspace.path().display().to_string()];
        self.runner
            .run(&self.config.compile_script(), &args, &self.config.base_dir)
            .await
    }

    /// Run the link script with the workspace directory followed by the
    /// deduplicated object list. Only called after a zero-exit compile.
    pub async fn link(&self, workspace: &Workspace, objects: &[&str]) -> Result<StageOutput> {
        let mut args = vec![workspace.path().display().to_string()];
        args.extend(objects.iter().map(|object| object.to_string()));

        self.runner
            .run(&self.config.link_script(), &args, &self.config.base_dir)
            .await
    }
}
