//! The module-processor capability interface.

use async_trait::async_trait;

use crate::result::RuntimeResult;
use crate::types::module::Module;

/// Action returned by a processor telling the runner what to do next.
///
/// Cancellation is threaded through the runner as a returned status — a
/// processor never aborts the chain by erroring. An `Err` from
/// [`ModuleProcessor::process`] is an unexpected fault, not a cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessAction {
    /// Continue to the next processor.
    Continue,
    /// Stop the pipeline — no further processors or the module body will
    /// run.
    Cancel {
        /// Human-readable reason for display.
        reason: String,
    },
}

impl ProcessAction {
    /// Creates a cancel action.
    pub fn cancel(reason: impl Into<String>) -> Self {
        Self::Cancel {
            reason: reason.into(),
        }
    }
}

/// A plugin run before or after a module's body to inspect or mutate it.
///
/// Processors execute strictly in descending-priority order from the index;
/// each runs to completion before the next is invoked.
#[async_trait]
pub trait ModuleProcessor: Send + Sync + std::fmt::Debug {
    /// Returns the processor name, used in logs and fault reports.
    fn name(&self) -> &str;

    /// Inspects or mutates the module.
    ///
    /// Return [`ProcessAction::Cancel`] to stop the pipeline cooperatively.
    /// An `Err` is treated as a processor fault and fails the whole
    /// execution.
    async fn process(&self, module: &mut Module) -> RuntimeResult<ProcessAction>;
}
