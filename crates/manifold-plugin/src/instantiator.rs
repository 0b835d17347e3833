//! Plugin instantiator — turns descriptors into live, injected instances.

use std::sync::Arc;

use tracing::debug;

use manifold_core::error::RuntimeError;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::{ModuleProcessor, PlatformHandler};

use crate::context::ServiceContext;
use crate::descriptor::{PluginDescriptor, PluginInstance};

/// Constructs capability instances from descriptors, injecting declared
/// dependencies from the [`ServiceContext`].
///
/// A factory either returns a fully-injected instance or fails; a
/// partially-injected instance can never escape, because injection happens
/// inside the factory before the instance is returned.
#[derive(Debug, Clone)]
pub struct PluginInstantiator {
    /// The injection context shared by all factories.
    context: Arc<ServiceContext>,
}

impl PluginInstantiator {
    /// Creates an instantiator over the given context.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }

    /// Returns the injection context.
    pub fn context(&self) -> &Arc<ServiceContext> {
        &self.context
    }

    /// Runs the descriptor's factory.
    ///
    /// Any factory failure (missing dependency, construction error) is
    /// surfaced as an `Instantiation` error naming the descriptor, with the
    /// original failure as the cause.
    pub fn create(&self, descriptor: &PluginDescriptor) -> RuntimeResult<PluginInstance> {
        debug!(
            capability = %descriptor.capability,
            plugin = %descriptor.name,
            "Instantiating plugin"
        );
        (descriptor.factory)(&self.context)
            .map_err(|cause| RuntimeError::instantiation(&descriptor.name, cause))
    }

    /// Creates a module processor from a processor descriptor.
    pub fn create_processor(
        &self,
        descriptor: &PluginDescriptor,
    ) -> RuntimeResult<Arc<dyn ModuleProcessor>> {
        self.create(descriptor)?.into_processor().ok_or_else(|| {
            RuntimeError::internal(format!(
                "Plugin '{}' did not produce a processor instance",
                descriptor.name
            ))
        })
    }

    /// Creates a platform handler from a platform descriptor.
    pub fn create_platform(
        &self,
        descriptor: &PluginDescriptor,
    ) -> RuntimeResult<Arc<dyn PlatformHandler>> {
        self.create(descriptor)?.into_platform().ok_or_else(|| {
            RuntimeError::internal(format!(
                "Plugin '{}' did not produce a platform handler instance",
                descriptor.name
            ))
        })
    }
}
