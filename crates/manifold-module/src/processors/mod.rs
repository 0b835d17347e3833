//! Built-in module processors.

pub mod check_inputs;
pub mod fill_defaults;
pub mod log_outputs;

pub use check_inputs::CheckInputsPreprocessor;
pub use fill_defaults::FillDefaultsPreprocessor;
pub use log_outputs::LogOutputsPostprocessor;

use manifold_core::result::RuntimeResult;
use manifold_plugin::descriptor::PluginDescriptor;
use manifold_plugin::index::PluginIndex;

/// Descriptors for all built-in processors.
pub fn builtin_descriptors() -> Vec<PluginDescriptor> {
    vec![
        FillDefaultsPreprocessor::descriptor(),
        CheckInputsPreprocessor::descriptor(),
        LogOutputsPostprocessor::descriptor(),
    ]
}

/// Registers all built-in processors with the index.
pub async fn register_builtin_processors(index: &PluginIndex) -> RuntimeResult<()> {
    for descriptor in builtin_descriptors() {
        index.register(descriptor).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifold_plugin::descriptor::Capability;

    #[tokio::test]
    async fn test_check_inputs_runs_after_fill_defaults() {
        let index = PluginIndex::new();
        register_builtin_processors(&index).await.unwrap();

        let names: Vec<String> = index
            .plugins(Capability::ModulePreprocessor)
            .await
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec![
                FillDefaultsPreprocessor::NAME.to_string(),
                CheckInputsPreprocessor::NAME.to_string()
            ]
        );
    }
}
