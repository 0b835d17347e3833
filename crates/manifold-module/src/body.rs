//! Closure-based module bodies for quick body creation.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use manifold_core::result::RuntimeResult;
use manifold_core::traits::ModuleBody;
use manifold_core::types::Module;

/// Future returned by a body closure, borrowing the module it works on.
pub type BodyFuture<'a> = Pin<Box<dyn Future<Output = RuntimeResult<()>> + Send + 'a>>;

/// A closure-based [`ModuleBody`], for wiring domain logic without a
/// dedicated type.
pub struct FnBody {
    /// Body function.
    run: Box<dyn for<'a> Fn(&'a mut Module) -> BodyFuture<'a> + Send + Sync>,
}

impl FnBody {
    /// Creates a body from a closure returning a boxed future.
    pub fn new<F>(run: F) -> Self
    where
        F: for<'a> Fn(&'a mut Module) -> BodyFuture<'a> + Send + Sync + 'static,
    {
        Self { run: Box::new(run) }
    }
}

impl std::fmt::Debug for FnBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnBody").field("run", &"<closure>").finish()
    }
}

#[async_trait]
impl ModuleBody for FnBody {
    async fn run(&self, module: &mut Module) -> RuntimeResult<()> {
        (self.run)(module).await
    }
}
