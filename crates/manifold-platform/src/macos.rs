//! macOS platform handler.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use manifold_core::error::RuntimeError;
use manifold_core::priority::Priority;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::{PlatformHandler, ProgramLauncher};
use manifold_plugin::descriptor::{Capability, PluginDescriptor, PluginInstance};

/// Returns whether the runtime is on macOS.
fn is_macos() -> bool {
    std::env::consts::OS == "macos"
}

/// Opens URLs through the system `open` utility, which defers to Launch
/// Services.
pub struct MacPlatform {
    /// Process-launch collaborator.
    launcher: Arc<dyn ProgramLauncher>,
}

impl MacPlatform {
    /// Descriptor name.
    pub const NAME: &'static str = "macos";

    /// Creates a macOS handler.
    pub fn new(launcher: Arc<dyn ProgramLauncher>) -> Self {
        Self { launcher }
    }

    /// Descriptor for the plugin index, applicable only on macOS.
    pub fn descriptor() -> PluginDescriptor {
        manifold_plugin::descriptor!(
            capability: Capability::PlatformHandler,
            name: Self::NAME,
            priority: Priority::NORMAL,
            applies: is_macos,
            factory: |context| {
                let launcher = context.require::<Arc<dyn ProgramLauncher>>()?;
                Ok(PluginInstance::Platform(Arc::new(MacPlatform::new(launcher))))
            },
        )
    }
}

impl std::fmt::Debug for MacPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacPlatform").finish()
    }
}

#[async_trait]
impl PlatformHandler for MacPlatform {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn open(&self, url: &str) -> RuntimeResult<()> {
        match self.launcher.launch("open", url).await {
            Ok(0) => {
                info!(url = %url, "Opened URL");
                Ok(())
            }
            _ => Err(RuntimeError::unreachable_target(url)),
        }
    }
}
