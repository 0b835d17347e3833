//! Windows platform handler.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use manifold_core::error::RuntimeError;
use manifold_core::priority::Priority;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::{PlatformHandler, ProgramLauncher};
use manifold_plugin::descriptor::{Capability, PluginDescriptor, PluginInstance};

/// Returns whether the runtime is on Windows.
fn is_windows() -> bool {
    std::env::consts::OS == "windows"
}

/// Opens URLs through `explorer`, which hands them to the default browser.
pub struct WindowsPlatform {
    /// Process-launch collaborator.
    launcher: Arc<dyn ProgramLauncher>,
}

impl WindowsPlatform {
    /// Descriptor name.
    pub const NAME: &'static str = "windows";

    /// Creates a Windows handler.
    pub fn new(launcher: Arc<dyn ProgramLauncher>) -> Self {
        Self { launcher }
    }

    /// Descriptor for the plugin index, applicable only on Windows.
    pub fn descriptor() -> PluginDescriptor {
        manifold_plugin::descriptor!(
            capability: Capability::PlatformHandler,
            name: Self::NAME,
            priority: Priority::NORMAL,
            applies: is_windows,
            factory: |context| {
                let launcher = context.require::<Arc<dyn ProgramLauncher>>()?;
                Ok(PluginInstance::Platform(Arc::new(WindowsPlatform::new(launcher))))
            },
        )
    }
}

impl std::fmt::Debug for WindowsPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowsPlatform").finish()
    }
}

#[async_trait]
impl PlatformHandler for WindowsPlatform {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn open(&self, url: &str) -> RuntimeResult<()> {
        match self.launcher.launch("explorer", url).await {
            Ok(0) => {
                info!(url = %url, "Opened URL");
                Ok(())
            }
            _ => Err(RuntimeError::unreachable_target(url)),
        }
    }
}
