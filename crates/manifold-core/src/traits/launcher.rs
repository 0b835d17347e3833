//! The process-launch collaborator contract.

use async_trait::async_trait;

/// Launches an external program and reports its exit code.
///
/// Used by platform handlers to probe candidate programs; a launch failure
/// is an `Err`, a launched-but-failed program is a non-zero exit code.
#[async_trait]
pub trait ProgramLauncher: Send + Sync {
    /// Runs `program` with a single argument string and waits for it to
    /// exit.
    async fn launch(&self, program: &str, arg: &str) -> std::io::Result<i32>;
}
