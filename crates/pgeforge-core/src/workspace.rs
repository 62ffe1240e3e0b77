//! Build workspace lifecycle.
//!
//! Every build request gets its own directory under the cache root, named by
//! UUID so concurrent requests never observe each other's files. The
//! directory holds the written source plus the toolchain's intermediate and
//! final outputs, and is removed when the owning request completes.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{Error, Result};

/// Filename the submitted source is written to inside a workspace.
pub const SOURCE_FILE: &str = "pgetinker.cpp";
/// Object file produced by the compile stage.
pub const OBJECT_FILE: &str = "pgetinker.o";
/// Self-contained HTML document produced by the link stage.
pub const ARTIFACT_FILE: &str = "pgetinker.html";

/// Root directory under which per-request workspaces are created.
#[derive(Debug, Clone)]
pub struct BuildRoot {
    root: PathBuf,
}

impl BuildRoot {
    /// Create a build root, making sure the directory exists.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Allocate a fresh workspace directory for one build request.
    pub fn create_workspace(&self) -> Result<Workspace> {
        let dir = self.root.join(Uuid::new_v4().simple().to_string());
        fs::create_dir(&dir).map_err(|e| Error::Workspace {
            path: dir.clone(),
            message: e.to_string(),
        })?;
        Ok(Workspace {
            dir,
            removed: false,
        })
    }
}

/// An isolated directory owned by exactly one build request.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
    removed: bool,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn source_path(&self) -> PathBuf {
        self.dir.join(SOURCE_FILE)
    }

    pub fn object_path(&self) -> PathBuf {
        self.dir.join(OBJECT_FILE)
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.dir.join(ARTIFACT_FILE)
    }

    /// Remove the workspace and everything in it.
    ///
    /// Safe to call when expected files were never created (a failed compile
    /// leaves no object file behind). Removal failures are logged and
    /// swallowed; a request must not fail over a leftover directory.
    pub fn cleanup(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        if let Err(e) = fs::remove_dir_all(&self.dir) {
            tracing::warn!("failed to remove workspace {}: {}", self.dir.display(), e);
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.remove();
    }
}
