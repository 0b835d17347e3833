//! A postprocessor that reports resolved output values.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use manifold_core::priority::Priority;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::{ModuleProcessor, ProcessAction};
use manifold_core::types::Module;
use manifold_plugin::descriptor::{Capability, PluginDescriptor, PluginInstance};

/// Logs each resolved output after the module body has run.
///
/// Ranked very low so domain postprocessors see the outputs first.
#[derive(Debug)]
pub struct LogOutputsPostprocessor;

impl LogOutputsPostprocessor {
    /// Descriptor name.
    pub const NAME: &'static str = "log-outputs";
    /// Chain rank.
    pub const PRIORITY: Priority = Priority::VERY_LOW;

    /// Descriptor for the plugin index.
    pub fn descriptor() -> PluginDescriptor {
        manifold_plugin::descriptor!(
            capability: Capability::ModulePostprocessor,
            name: Self::NAME,
            priority: Self::PRIORITY,
            factory: |_context| Ok(PluginInstance::Processor(Arc::new(LogOutputsPostprocessor))),
        )
    }
}

#[async_trait]
impl ModuleProcessor for LogOutputsPostprocessor {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn process(&self, module: &mut Module) -> RuntimeResult<ProcessAction> {
        let spec = module.spec().clone();
        for item in &spec.outputs {
            if let Some(value) = module.output(&item.name) {
                info!(
                    module = %spec.name,
                    output = %item.name,
                    value = %value,
                    "Module output resolved"
                );
            }
        }
        Ok(ProcessAction::Continue)
    }
}
