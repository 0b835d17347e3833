//! # manifold-platform
//!
//! The platform-handler capability family: competing implementations
//! selected by priority and runtime applicability, with a universal
//! fallback that is always present and never beats a more specific
//! applicable handler.

pub mod fallback;
pub mod launcher;
pub mod macos;
pub mod selector;
pub mod windows;

pub use fallback::FallbackPlatform;
pub use launcher::SystemLauncher;
pub use macos::MacPlatform;
pub use selector::{register_builtin_platforms, select_platform};
pub use windows::WindowsPlatform;
