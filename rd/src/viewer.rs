//! External viewer process management
//!
//! Artifacts are displayed by spawning the configured viewer program once
//! per artifact. A handle owns its child process: closing kills and reaps
//! it, dropping closes it, and closing a viewer that already exited on its
//! own is a no-op.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use eyre::{Context, Result};
use tracing::{debug, warn};

/// Launches the configured viewer program
#[derive(Debug, Clone)]
pub struct Viewer {
    program: String,
}

impl Viewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Spawn a viewer process for the given artifact.
    ///
    /// The viewer runs as an independent process with detached stdio; the
    /// handle supports termination and nothing else. The same handle type
    /// serves task and solution artifacts.
    pub fn open(&self, artifact: &Path) -> Result<ViewerHandle> {
        let child = Command::new(&self.program)
            .arg(artifact)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context(format!(
                "Failed to launch viewer '{}' for {}",
                self.program,
                artifact.display()
            ))?;

        debug!(pid = child.id(), artifact = %artifact.display(), "viewer spawned");
        Ok(ViewerHandle {
            child: Some(child),
            artifact: artifact.to_path_buf(),
        })
    }
}

/// A running viewer process for one artifact
#[derive(Debug)]
pub struct ViewerHandle {
    child: Option<Child>,
    artifact: PathBuf,
}

impl ViewerHandle {
    /// Terminate the viewer process.
    ///
    /// A process that already exited is reaped quietly; close is idempotent.
    pub fn close(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                debug!(artifact = %self.artifact.display(), error = %e, "viewer already gone");
            }
            if let Err(e) = child.wait() {
                warn!(artifact = %self.artifact.display(), error = %e, "failed to reap viewer");
            }
        }
    }

    /// Artifact this viewer was opened for
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }
}

impl Drop for ViewerHandle {
    fn drop(&mut self) {
        self.close();
    }
}
