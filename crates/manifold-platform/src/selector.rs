//! Platform selection — resolving the handler for the current environment.

use std::sync::Arc;

use tracing::debug;

use manifold_core::config::platform::PlatformConfig;
use manifold_core::error::RuntimeError;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::PlatformHandler;
use manifold_plugin::descriptor::Capability;
use manifold_plugin::index::PluginIndex;
use manifold_plugin::instantiator::PluginInstantiator;

/// Registers the built-in platform handlers, including the universal
/// fallback.
///
/// The fallback applies unconditionally at very low priority, so a
/// specific-platform handler always wins when one matches, and selection
/// can never come up empty.
pub async fn register_builtin_platforms(
    index: &PluginIndex,
    config: &PlatformConfig,
) -> RuntimeResult<()> {
    index.register(crate::macos::MacPlatform::descriptor()).await?;
    index
        .register(crate::windows::WindowsPlatform::descriptor())
        .await?;
    index
        .register(crate::fallback::FallbackPlatform::descriptor(
            config.browsers.clone(),
        ))
        .await?;
    Ok(())
}

/// Selects and instantiates the platform handler for the current
/// environment: the highest-priority descriptor that is enabled and
/// applicable.
pub async fn select_platform(
    index: &PluginIndex,
    instantiator: &PluginInstantiator,
) -> RuntimeResult<Arc<dyn PlatformHandler>> {
    let candidates = index
        .plugins_where(Capability::PlatformHandler, |descriptor| {
            descriptor.enabled && descriptor.applies_to_current_environment()
        })
        .await;

    let winner = candidates.first().ok_or_else(|| {
        RuntimeError::not_found("No applicable platform handler is registered")
    })?;

    debug!(
        platform = %winner.name,
        priority = %winner.priority,
        candidates = candidates.len(),
        "Selected platform handler"
    );

    instantiator.create_platform(winner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FallbackPlatform;
    use async_trait::async_trait;
    use manifold_core::priority::Priority;
    use manifold_core::traits::ProgramLauncher;
    use manifold_plugin::context::ServiceContext;
    use manifold_plugin::descriptor::{PluginDescriptor, PluginInstance};

    #[derive(Debug)]
    struct NoopLauncher;

    #[async_trait]
    impl ProgramLauncher for NoopLauncher {
        async fn launch(&self, _program: &str, _arg: &str) -> std::io::Result<i32> {
            Ok(0)
        }
    }

    #[derive(Debug)]
    struct NamedPlatform(&'static str);

    #[async_trait]
    impl manifold_core::traits::PlatformHandler for NamedPlatform {
        fn name(&self) -> &str {
            self.0
        }

        async fn open(&self, _url: &str) -> RuntimeResult<()> {
            Ok(())
        }
    }

    fn platform_descriptor(
        name: &'static str,
        priority: Priority,
        applies: fn() -> bool,
    ) -> PluginDescriptor {
        PluginDescriptor::new(Capability::PlatformHandler, name, priority, move |_| {
            Ok(PluginInstance::Platform(Arc::new(NamedPlatform(name))))
        })
        .with_applies(applies)
    }

    fn instantiator() -> PluginInstantiator {
        let context = Arc::new(ServiceContext::new());
        context.register::<Arc<dyn ProgramLauncher>>(Arc::new(NoopLauncher));
        PluginInstantiator::new(context)
    }

    async fn index_with_fallback() -> PluginIndex {
        let index = PluginIndex::new();
        index
            .register(FallbackPlatform::descriptor(vec!["xdg-open".to_string()]))
            .await
            .unwrap();
        index
    }

    #[tokio::test]
    async fn test_fallback_selected_when_nothing_else_applies() {
        let index = index_with_fallback().await;
        index
            .register(platform_descriptor("elsewhere", Priority::NORMAL, || false))
            .await
            .unwrap();

        let platform = select_platform(&index, &instantiator()).await.unwrap();
        assert_eq!(platform.name(), FallbackPlatform::NAME);
    }

    #[tokio::test]
    async fn test_applicable_specific_handler_beats_fallback() {
        let index = index_with_fallback().await;
        index
            .register(platform_descriptor("here", Priority::NORMAL, || true))
            .await
            .unwrap();

        let platform = select_platform(&index, &instantiator()).await.unwrap();
        assert_eq!(platform.name(), "here");
    }

    #[tokio::test]
    async fn test_highest_priority_applicable_handler_wins() {
        let index = index_with_fallback().await;
        index
            .register(platform_descriptor("normal", Priority::NORMAL, || true))
            .await
            .unwrap();
        index
            .register(platform_descriptor("preferred", Priority::HIGH, || true))
            .await
            .unwrap();

        let platform = select_platform(&index, &instantiator()).await.unwrap();
        assert_eq!(platform.name(), "preferred");
    }

    #[tokio::test]
    async fn test_disabled_handler_is_never_selected() {
        let index = index_with_fallback().await;
        index
            .register(
                platform_descriptor("disabled", Priority::HIGH, || true).disabled(),
            )
            .await
            .unwrap();

        let platform = select_platform(&index, &instantiator()).await.unwrap();
        assert_eq!(platform.name(), FallbackPlatform::NAME);
    }

    #[tokio::test]
    async fn test_builtin_registration_always_yields_a_candidate() {
        let index = PluginIndex::new();
        register_builtin_platforms(&index, &Default::default())
            .await
            .unwrap();

        // Whatever OS the tests run on, selection must succeed.
        let platform = select_platform(&index, &instantiator()).await.unwrap();
        assert!(!platform.name().is_empty());
    }
}
