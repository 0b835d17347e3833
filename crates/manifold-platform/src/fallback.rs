//! The universal fallback platform handler.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use manifold_core::error::RuntimeError;
use manifold_core::priority::Priority;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::{PlatformHandler, ProgramLauncher};
use manifold_plugin::descriptor::{Capability, PluginDescriptor, PluginInstance};

/// Opens URLs by probing a fixed, ordered list of known external programs.
///
/// Applies unconditionally and is ranked very low, so it is selected only
/// when no platform-specific handler matches the running environment — but
/// its presence guarantees that at least one applicable handler always
/// exists.
pub struct FallbackPlatform {
    /// Process-launch collaborator.
    launcher: Arc<dyn ProgramLauncher>,
    /// Candidate programs, tried in order.
    browsers: Vec<String>,
}

impl FallbackPlatform {
    /// Descriptor name.
    pub const NAME: &'static str = "fallback";
    /// Rank below every specific platform handler.
    pub const PRIORITY: Priority = Priority::VERY_LOW;

    /// Creates a fallback handler probing the given candidate programs.
    pub fn new(launcher: Arc<dyn ProgramLauncher>, browsers: Vec<String>) -> Self {
        Self { launcher, browsers }
    }

    /// Descriptor for the plugin index.
    ///
    /// The factory injects the launcher from the service context, so the
    /// descriptor only has to carry the candidate list.
    pub fn descriptor(browsers: Vec<String>) -> PluginDescriptor {
        PluginDescriptor::new(
            Capability::PlatformHandler,
            Self::NAME,
            Self::PRIORITY,
            move |context| {
                let launcher = context.require::<Arc<dyn ProgramLauncher>>()?;
                Ok(PluginInstance::Platform(Arc::new(FallbackPlatform::new(
                    launcher,
                    browsers.clone(),
                ))))
            },
        )
    }
}

impl std::fmt::Debug for FallbackPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackPlatform")
            .field("browsers", &self.browsers)
            .finish()
    }
}

#[async_trait]
impl PlatformHandler for FallbackPlatform {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// Tries each candidate program until one exits 0.
    ///
    /// A failure to launch means the program is not installed; both that
    /// and a non-zero exit move on to the next candidate. Exhausting the
    /// list is reported as a single aggregated failure naming the URL.
    async fn open(&self, url: &str) -> RuntimeResult<()> {
        for browser in &self.browsers {
            match self.launcher.launch(browser, url).await {
                Ok(0) => {
                    info!(browser = %browser, url = %url, "Opened URL");
                    return Ok(());
                }
                Ok(code) => {
                    debug!(browser = %browser, code, "Candidate exited non-zero");
                }
                Err(error) => {
                    debug!(browser = %browser, error = %error, "Candidate failed to launch");
                }
            }
        }
        Err(RuntimeError::unreachable_target(url))
    }
}
