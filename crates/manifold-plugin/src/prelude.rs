//! Prelude for convenient imports in plugin code.

pub use async_trait::async_trait;

pub use manifold_core::priority::Priority;
pub use manifold_core::result::RuntimeResult;
pub use manifold_core::traits::{ModuleBody, ModuleProcessor, PlatformHandler, ProcessAction};
pub use manifold_core::types::{ItemKind, Module, ModuleItem, ModuleSpec, ModuleStatus};

pub use crate::context::ServiceContext;
pub use crate::descriptor::{Capability, PluginDescriptor, PluginInstance, UiHints};
pub use crate::index::PluginIndex;
pub use crate::instantiator::PluginInstantiator;

pub use crate::descriptor;
