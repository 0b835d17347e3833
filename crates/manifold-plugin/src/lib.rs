//! # manifold-plugin
//!
//! Plugin discovery core for Manifold. Provides:
//!
//! - Immutable plugin descriptors with capability, priority, and
//!   applicability metadata
//! - A capability-indexed registry with priority-ordered, snapshot reads
//! - A type-keyed service context for dependency injection
//! - The instantiator turning descriptors into live, fully-injected
//!   capability instances

pub mod context;
pub mod descriptor;
pub mod index;
pub mod instantiator;
pub mod macros;
pub mod prelude;

pub use context::ServiceContext;
pub use descriptor::{Capability, PluginDescriptor, PluginInstance, UiHints};
pub use index::PluginIndex;
pub use instantiator::PluginInstantiator;
