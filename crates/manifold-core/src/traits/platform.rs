//! The platform-handler capability interface.

use async_trait::async_trait;

use crate::result::RuntimeResult;

/// A plugin encapsulating platform-specific behavior, selected by priority
/// and runtime applicability.
#[async_trait]
pub trait PlatformHandler: Send + Sync {
    /// Returns the handler name.
    fn name(&self) -> &str;

    /// Opens the given URL with the platform's means.
    async fn open(&self, url: &str) -> RuntimeResult<()>;
}
