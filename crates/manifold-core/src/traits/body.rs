//! The module-body collaborator contract.

use async_trait::async_trait;

use crate::result::RuntimeResult;
use crate::types::module::Module;

/// Domain-specific logic executed between the pre- and postprocessing
/// phases. The runtime only sequences processors around it.
#[async_trait]
pub trait ModuleBody: Send + Sync {
    /// Runs the module's own logic, reading inputs and writing outputs.
    async fn run(&self, module: &mut Module) -> RuntimeResult<()>;
}
