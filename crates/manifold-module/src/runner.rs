//! Module runner — drives one module through its processing pipeline.
//!
//! For one execution:
//! - Preprocessors run in descending-priority order; any of them may cancel,
//!   which skips the remaining preprocessors, the body, and the whole
//!   postprocessing phase.
//! - The body runs only if preprocessing left the module pending.
//! - Postprocessors run in descending-priority order after completion; a
//!   postprocess cancellation marks the finished run canceled.
//!
//! Cancellation is a normal outcome reported in the [`RunReport`]; an `Err`
//! from a processor is a fault and fails the execution.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use manifold_core::error::RuntimeError;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::{ModuleBody, ModuleProcessor, ProcessAction};
use manifold_core::types::{Module, ModuleStatus};
use manifold_plugin::descriptor::Capability;
use manifold_plugin::index::PluginIndex;
use manifold_plugin::instantiator::PluginInstantiator;

/// Outcome of one module execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// The executed module.
    pub module_id: Uuid,
    /// Final status.
    pub status: ModuleStatus,
    /// Cancellation reason (if canceled).
    pub cancel_reason: Option<String>,
    /// Processor that canceled (if canceled).
    pub canceled_by: Option<String>,
    /// Wall-clock duration of the execution.
    pub duration_ms: u64,
}

/// Executes modules, resolving their processor chains from the plugin
/// index.
///
/// The runner owns the module exclusively for the duration of one `run`
/// call; concurrent executions each bring their own module instance and
/// share only the index.
#[derive(Debug, Clone)]
pub struct ModuleRunner {
    /// Plugin index the processor chains are resolved from.
    index: Arc<PluginIndex>,
    /// Instantiator for processor descriptors.
    instantiator: Arc<PluginInstantiator>,
}

impl ModuleRunner {
    /// Creates a runner over the given index and instantiator.
    pub fn new(index: Arc<PluginIndex>, instantiator: Arc<PluginInstantiator>) -> Self {
        Self {
            index,
            instantiator,
        }
    }

    /// Runs one module: preprocess → body → postprocess.
    ///
    /// Returns the report for both completed and canceled runs; an `Err` is
    /// an instantiation failure, a processor fault, or a body failure.
    pub async fn run(
        &self,
        module: &mut Module,
        body: &dyn ModuleBody,
    ) -> RuntimeResult<RunReport> {
        let started = Instant::now();
        let mut canceled_by = None;

        let preprocessors = self.resolve(Capability::ModulePreprocessor).await?;
        self.run_phase(module, &preprocessors, &mut canceled_by)
            .await?;

        if !module.is_canceled() {
            body.run(module).await?;
            module.mark_complete();
            debug!(module = %module.spec().name, id = %module.id(), "Module body completed");

            let postprocessors = self.resolve(Capability::ModulePostprocessor).await?;
            self.run_phase(module, &postprocessors, &mut canceled_by)
                .await?;
        }

        let report = RunReport {
            module_id: module.id(),
            status: module.status(),
            cancel_reason: module.cancel_reason().map(String::from),
            canceled_by,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            module = %module.spec().name,
            id = %module.id(),
            status = ?report.status,
            duration_ms = report.duration_ms,
            "Module execution finished"
        );

        Ok(report)
    }

    /// Resolves and instantiates the enabled, applicable processors for a
    /// phase, in priority order.
    async fn resolve(
        &self,
        capability: Capability,
    ) -> RuntimeResult<Vec<Arc<dyn ModuleProcessor>>> {
        let descriptors = self
            .index
            .plugins_where(capability, |descriptor| {
                descriptor.enabled && descriptor.applies_to_current_environment()
            })
            .await;

        descriptors
            .iter()
            .map(|descriptor| self.instantiator.create_processor(descriptor))
            .collect()
    }

    /// Runs one processing phase, stopping at the first cancellation.
    ///
    /// The module's status is checked after every invocation, so a
    /// processor that cancels the module directly stops the chain just like
    /// a returned [`ProcessAction::Cancel`].
    async fn run_phase(
        &self,
        module: &mut Module,
        processors: &[Arc<dyn ModuleProcessor>],
        canceled_by: &mut Option<String>,
    ) -> RuntimeResult<()> {
        for processor in processors {
            debug!(
                module = %module.spec().name,
                processor = processor.name(),
                "Running processor"
            );

            let action = processor
                .process(module)
                .await
                .map_err(|cause| RuntimeError::processor_fault(processor.name(), cause))?;

            if let ProcessAction::Cancel { reason } = action {
                module.cancel(reason.as_str());
                *canceled_by = Some(processor.name().to_string());
                info!(
                    module = %module.spec().name,
                    processor = processor.name(),
                    reason = %reason,
                    "Processor canceled execution"
                );
                break;
            }

            if module.is_canceled() {
                if canceled_by.is_none() {
                    *canceled_by = Some(processor.name().to_string());
                }
                break;
            }
        }
        Ok(())
    }
}
