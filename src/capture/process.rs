//! Subprocess-backed capture
//!
//! [`ProcessCapture`] spawns `<interpreter> <script>` with stdin closed and
//! stdout/stderr collected into separate buffers, then waits for the child to
//! exit. There is no timeout and the child is not killed if the request is
//! dropped.

use std::{path::PathBuf, process::Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{CaptureFacade, InterpreterResolver};
use crate::{
    error::{CaptureError, CaptureResult},
    model::CapturedImage,
};

/// Runs the external capture routine as a child process
#[derive(Debug, Clone)]
pub struct ProcessCapture {
    resolver: InterpreterResolver,
    script:   PathBuf,
}

impl ProcessCapture {
    /// Creates a capture that runs `script` with the interpreter picked by
    /// `resolver`
    ///
    /// A relative `script` is resolved against the server's working
    /// directory by the child.
    pub fn new(resolver: InterpreterResolver, script: impl Into<PathBuf>) -> Self {
        Self {
            resolver,
            script: script.into(),
        }
    }
}

#[async_trait]
impl CaptureFacade for ProcessCapture {
    async fn capture(&self) -> CaptureResult<CapturedImage> {
        let interpreter = self.resolver.resolve();
        debug!(
            interpreter = %interpreter.program.display(),
            source = ?interpreter.source,
            script = %self.script.display(),
            "Spawning capture routine"
        );

        let child = Command::new(&interpreter.program)
            .arg(&self.script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CaptureError::SpawnFailed {
                interpreter: interpreter.program.clone(),
                source,
            })?;

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(CaptureError::ProcessFailed {
                exit_code: output.status.code(),
                stdout:    output.stdout,
                stderr:    output.stderr,
            });
        }

        if output.stdout.is_empty() {
            return Err(CaptureError::EmptyOutput {
                stderr: output.stderr,
            });
        }

        Ok(CapturedImage::new(output.stdout))
    }
}
