//! System implementation of the process-launch collaborator.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use manifold_core::traits::ProgramLauncher;

/// Launches external programs as child processes, discarding their output
/// and waiting for exit.
#[derive(Debug, Default, Clone)]
pub struct SystemLauncher;

impl SystemLauncher {
    /// Creates a new system launcher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgramLauncher for SystemLauncher {
    async fn launch(&self, program: &str, arg: &str) -> std::io::Result<i32> {
        debug!(program = %program, arg = %arg, "Launching external program");

        let status = Command::new(program)
            .arg(arg)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        Ok(status.code().unwrap_or(-1))
    }
}
