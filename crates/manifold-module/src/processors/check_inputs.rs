//! A preprocessor that does a final check of input values, canceling if any
//! required ones are unset.

use std::sync::Arc;

use async_trait::async_trait;

use manifold_core::priority::Priority;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::{ModuleProcessor, ProcessAction};
use manifold_core::types::Module;
use manifold_plugin::descriptor::{Capability, PluginDescriptor, PluginInstance};

use super::fill_defaults::FillDefaultsPreprocessor;

/// Cancels execution the first time a required input is found unset.
///
/// Walks the input declarations in order and stops at the first violation;
/// it does not accumulate the remaining missing names. Ranked immediately
/// after [`FillDefaultsPreprocessor`] so defaults are already applied when
/// the check runs.
#[derive(Debug)]
pub struct CheckInputsPreprocessor;

impl CheckInputsPreprocessor {
    /// Descriptor name.
    pub const NAME: &'static str = "check-inputs";
    /// Chain rank, immediately after default filling.
    pub const PRIORITY: Priority = FillDefaultsPreprocessor::PRIORITY.offset(-1.0);

    /// Descriptor for the plugin index.
    pub fn descriptor() -> PluginDescriptor {
        manifold_plugin::descriptor!(
            capability: Capability::ModulePreprocessor,
            name: Self::NAME,
            priority: Self::PRIORITY,
            factory: |_context| Ok(PluginInstance::Processor(Arc::new(CheckInputsPreprocessor))),
        )
    }
}

#[async_trait]
impl ModuleProcessor for CheckInputsPreprocessor {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn process(&self, module: &mut Module) -> RuntimeResult<ProcessAction> {
        for item in &module.spec().inputs {
            if item.required && module.input(&item.name).is_none() {
                return Ok(ProcessAction::cancel(format!(
                    "'{}' is required but unset.",
                    item.name
                )));
            }
        }
        Ok(ProcessAction::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifold_core::types::{ItemKind, ModuleItem, ModuleSpec, ModuleStatus};
    use serde_json::json;

    fn spec() -> Arc<ModuleSpec> {
        Arc::new(
            ModuleSpec::new("checked")
                .with_input(ModuleItem::required("x", ItemKind::Text))
                .with_input(ModuleItem::required("y", ItemKind::Text)),
        )
    }

    #[tokio::test]
    async fn test_first_missing_required_input_cancels() {
        let mut module = Module::new(spec());
        module.set_input("y", json!("present")).unwrap();

        let action = CheckInputsPreprocessor.process(&mut module).await.unwrap();

        assert_eq!(
            action,
            ProcessAction::cancel("'x' is required but unset.")
        );
    }

    #[tokio::test]
    async fn test_short_circuits_on_first_violation() {
        let mut module = Module::new(spec());

        let action = CheckInputsPreprocessor.process(&mut module).await.unwrap();

        // Both are missing; only the first is reported.
        assert_eq!(
            action,
            ProcessAction::cancel("'x' is required but unset.")
        );
    }

    #[tokio::test]
    async fn test_all_required_inputs_set_continues() {
        let mut module = Module::new(spec());
        module.set_input("x", json!("a")).unwrap();
        module.set_input("y", json!("b")).unwrap();

        let action = CheckInputsPreprocessor.process(&mut module).await.unwrap();

        assert_eq!(action, ProcessAction::Continue);
        assert_eq!(module.status(), ModuleStatus::Pending);
    }

    #[tokio::test]
    async fn test_unset_optional_inputs_are_ignored() {
        let spec = Arc::new(
            ModuleSpec::new("optional")
                .with_input(ModuleItem::optional("maybe", ItemKind::Int)),
        );
        let mut module = Module::new(spec);

        let action = CheckInputsPreprocessor.process(&mut module).await.unwrap();

        assert_eq!(action, ProcessAction::Continue);
    }
}
