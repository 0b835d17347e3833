//! Cross-crate trait seams.
//!
//! Capability interfaces and external-collaborator contracts live here so
//! that the registry, the pipeline, and concrete plugin crates can depend on
//! them without depending on each other.

pub mod body;
pub mod launcher;
pub mod platform;
pub mod processor;

pub use body::ModuleBody;
pub use launcher::ProgramLauncher;
pub use platform::PlatformHandler;
pub use processor::{ModuleProcessor, ProcessAction};
