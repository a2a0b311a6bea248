//! Advisory transport that delegates to an external program.
//!
//! The request is written to the program's stdin as JSON and its stdout is
//! parsed as the JSON response. Any bridge to a hosted model can be plugged in
//! this way without the library knowing about it.

use super::{AdvisoryClient, AdvisoryRequest};
use crate::errors::AdvisoryFailure;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Clone, Debug)]
pub struct CommandAdvisor {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandAdvisor {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Resolve `program` on `PATH` up front so a missing binary is reported
    /// once at startup instead of on every request.
    pub fn resolve(program: &str, args: Vec<String>) -> Result<Self, AdvisoryFailure> {
        which::which(program)
            .map(|path| Self::new(path, args))
            .map_err(|e| AdvisoryFailure::Transport(format!("cannot find '{program}': {e}")))
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }
}

#[async_trait]
impl AdvisoryClient for CommandAdvisor {
    async fn advise(
        &self,
        request: &AdvisoryRequest,
    ) -> Result<serde_json::Value, AdvisoryFailure> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| AdvisoryFailure::Transport(format!("cannot encode request: {e}")))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AdvisoryFailure::Transport(format!(
                    "failed to start {}: {e}",
                    self.program.display()
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&payload)
                .await
                .map_err(|e| AdvisoryFailure::Transport(format!("cannot send request: {e}")))?;
            // Dropping stdin closes the pipe so the program sees EOF.
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| AdvisoryFailure::Transport(format!("advisory process failed: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AdvisoryFailure::Transport(format!(
                "advisory process exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| AdvisoryFailure::Transport(format!("advisory output is not JSON: {e}")))
    }
}
