//! Shared domain types.

pub mod module;

pub use module::{ItemKind, Module, ModuleItem, ModuleSpec, ModuleStatus};
