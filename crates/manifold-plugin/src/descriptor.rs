//! Plugin descriptors — immutable metadata records describing one
//! discoverable implementation, prior to instantiation.
//!
//! Descriptors are produced by a discovery collaborator (compiled-in
//! `descriptors()` functions, a scanner, a manifest reader) and consumed by
//! the [`crate::index::PluginIndex`]; the runtime never re-derives capability
//! or priority metadata itself.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use manifold_core::priority::Priority;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::{ModuleProcessor, PlatformHandler};

use crate::context::ServiceContext;

/// The capability a plugin implements, used as the index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Processors run before a module's body.
    ModulePreprocessor,
    /// Processors run after a module's body.
    ModulePostprocessor,
    /// Platform-specific behavior handlers.
    PlatformHandler,
}

impl Capability {
    /// Returns the string name of this capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModulePreprocessor => "module_preprocessor",
            Self::ModulePostprocessor => "module_postprocessor",
            Self::PlatformHandler => "platform_handler",
        }
    }

    /// All capabilities, in a stable order.
    pub fn all() -> [Capability; 3] {
        [
            Self::ModulePreprocessor,
            Self::ModulePostprocessor,
            Self::PlatformHandler,
        ]
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A live instance of a capability interface, produced by a descriptor's
/// factory.
#[derive(Clone)]
pub enum PluginInstance {
    /// A module pre- or postprocessor.
    Processor(Arc<dyn ModuleProcessor>),
    /// A platform handler.
    Platform(Arc<dyn PlatformHandler>),
}

impl PluginInstance {
    /// Extracts the processor instance, if this is one.
    pub fn into_processor(self) -> Option<Arc<dyn ModuleProcessor>> {
        match self {
            Self::Processor(processor) => Some(processor),
            Self::Platform(_) => None,
        }
    }

    /// Extracts the platform handler instance, if this is one.
    pub fn into_platform(self) -> Option<Arc<dyn PlatformHandler>> {
        match self {
            Self::Platform(platform) => Some(platform),
            Self::Processor(_) => None,
        }
    }
}

impl fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processor(processor) => {
                f.debug_tuple("Processor").field(&processor.name()).finish()
            }
            Self::Platform(platform) => {
                f.debug_tuple("Platform").field(&platform.name()).finish()
            }
        }
    }
}

/// Constructor invoked by the instantiator with the injection context.
pub type PluginFactory =
    Arc<dyn Fn(&ServiceContext) -> RuntimeResult<PluginInstance> + Send + Sync>;

/// Runtime-applicability predicate (`true` = usable in the current
/// environment).
pub type AppliesFn = fn() -> bool;

/// Optional presentation metadata for plugins surfaced in a UI.
///
/// Capabilities that only need the functional interface never construct
/// this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiHints {
    /// Menu path, `>`-separated.
    pub menu_path: Option<String>,
    /// Path to the plugin's icon.
    pub icon_path: Option<String>,
    /// Group of linked selectable plugins, at most one selected at a time.
    pub selection_group: Option<String>,
    /// Whether the plugin is displayed at all.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Default for UiHints {
    fn default() -> Self {
        Self {
            menu_path: None,
            icon_path: None,
            selection_group: None,
            visible: default_visible(),
        }
    }
}

fn default_visible() -> bool {
    true
}

/// Immutable metadata record describing one discoverable implementation.
///
/// Identity is `(capability, name)`: registering a second descriptor with
/// the same identity replaces the first.
#[derive(Clone)]
pub struct PluginDescriptor {
    /// The capability this plugin implements.
    pub capability: Capability,
    /// Plugin name, unique per capability.
    pub name: String,
    /// Rank among competing implementations; higher is tried first.
    pub priority: Priority,
    /// Whether the plugin participates in lookups that filter on enablement.
    pub enabled: bool,
    /// Runtime-applicability predicate; `None` applies unconditionally.
    pub applies: Option<AppliesFn>,
    /// Presentation metadata, if the plugin is surfaced in a UI.
    pub ui: Option<UiHints>,
    /// Constructor for the live instance.
    pub factory: PluginFactory,
}

impl PluginDescriptor {
    /// Creates an enabled, unconditionally-applicable descriptor.
    pub fn new(
        capability: Capability,
        name: &str,
        priority: Priority,
        factory: impl Fn(&ServiceContext) -> RuntimeResult<PluginInstance> + Send + Sync + 'static,
    ) -> Self {
        Self {
            capability,
            name: name.to_string(),
            priority,
            enabled: true,
            applies: None,
            ui: None,
            factory: Arc::new(factory),
        }
    }

    /// Marks the descriptor disabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Sets the runtime-applicability predicate.
    pub fn with_applies(mut self, applies: AppliesFn) -> Self {
        self.applies = Some(applies);
        self
    }

    /// Attaches presentation metadata.
    pub fn with_ui(mut self, ui: UiHints) -> Self {
        self.ui = Some(ui);
        self
    }

    /// Evaluates the applicability predicate; descriptors without one apply
    /// everywhere.
    pub fn applies_to_current_environment(&self) -> bool {
        self.applies.map(|applies| applies()).unwrap_or(true)
    }

    /// Checks the representable malformed-input conditions rejected at
    /// registration time.
    pub(crate) fn validate(&self) -> RuntimeResult<()> {
        if self.name.trim().is_empty() {
            return Err(manifold_core::RuntimeError::invalid_descriptor(
                "Descriptor name must not be empty",
            ));
        }
        if !self.priority.value().is_finite() {
            return Err(manifold_core::RuntimeError::invalid_descriptor(format!(
                "Descriptor '{}' has a non-finite priority",
                self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("capability", &self.capability)
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("enabled", &self.enabled)
            .field("applies", &self.applies.map(|_| "<fn>"))
            .field("ui", &self.ui)
            .finish()
    }
}
