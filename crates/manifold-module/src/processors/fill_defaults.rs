//! A preprocessor that populates unset inputs from declared defaults.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use manifold_core::priority::Priority;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::{ModuleProcessor, ProcessAction};
use manifold_core::types::Module;
use manifold_plugin::descriptor::{Capability, PluginDescriptor, PluginInstance};

/// Applies each input's declared default when no value was supplied.
///
/// Runs ahead of the required-input check so that validation sees defaults
/// already applied.
#[derive(Debug)]
pub struct FillDefaultsPreprocessor;

impl FillDefaultsPreprocessor {
    /// Descriptor name.
    pub const NAME: &'static str = "fill-defaults";
    /// Chain rank.
    pub const PRIORITY: Priority = Priority::NORMAL;

    /// Descriptor for the plugin index.
    pub fn descriptor() -> PluginDescriptor {
        manifold_plugin::descriptor!(
            capability: Capability::ModulePreprocessor,
            name: Self::NAME,
            priority: Self::PRIORITY,
            factory: |_context| Ok(PluginInstance::Processor(Arc::new(FillDefaultsPreprocessor))),
        )
    }
}

#[async_trait]
impl ModuleProcessor for FillDefaultsPreprocessor {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn process(&self, module: &mut Module) -> RuntimeResult<ProcessAction> {
        let spec = module.spec().clone();
        for item in &spec.inputs {
            if module.input(&item.name).is_some() {
                continue;
            }
            if let Some(default) = &item.default {
                debug!(
                    module = %spec.name,
                    input = %item.name,
                    "Applying default value"
                );
                module.set_input(&item.name, default.clone())?;
            }
        }
        Ok(ProcessAction::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifold_core::types::{ItemKind, ModuleItem, ModuleSpec};
    use serde_json::json;

    #[tokio::test]
    async fn test_fills_only_unset_inputs() {
        let spec = Arc::new(
            ModuleSpec::new("defaults")
                .with_input(ModuleItem::optional("a", ItemKind::Int).with_default(json!(1)))
                .with_input(ModuleItem::optional("b", ItemKind::Int).with_default(json!(2)))
                .with_input(ModuleItem::optional("c", ItemKind::Int)),
        );
        let mut module = Module::new(spec);
        module.set_input("b", json!(20)).unwrap();

        let action = FillDefaultsPreprocessor
            .process(&mut module)
            .await
            .unwrap();

        assert_eq!(action, ProcessAction::Continue);
        assert_eq!(module.input("a"), Some(&json!(1)));
        assert_eq!(module.input("b"), Some(&json!(20)));
        assert_eq!(module.input("c"), None);
    }
}
