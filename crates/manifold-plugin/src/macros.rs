//! Convenience macros for plugin development.

/// Macro for declaring a plugin descriptor.
///
/// # Example
/// ```rust,ignore
/// let descriptor = descriptor!(
///     capability: Capability::ModulePreprocessor,
///     name: "check-inputs",
///     priority: CheckInputsPreprocessor::PRIORITY,
///     factory: |_context| Ok(PluginInstance::Processor(Arc::new(CheckInputsPreprocessor))),
/// );
/// ```
#[macro_export]
macro_rules! descriptor {
    (
        capability: $capability:expr,
        name: $name:expr,
        priority: $priority:expr,
        factory: $factory:expr $(,)?
    ) => {
        $crate::descriptor::PluginDescriptor::new($capability, $name, $priority, $factory)
    };
    (
        capability: $capability:expr,
        name: $name:expr,
        priority: $priority:expr,
        applies: $applies:expr,
        factory: $factory:expr $(,)?
    ) => {
        $crate::descriptor::PluginDescriptor::new($capability, $name, $priority, $factory)
            .with_applies($applies)
    };
}
