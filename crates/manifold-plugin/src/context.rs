//! Service context — the type-keyed locator plugins are injected from.

use std::any::{Any, TypeId};

use dashmap::DashMap;
use tracing::debug;

use manifold_core::error::RuntimeError;
use manifold_core::result::RuntimeResult;

/// Shared services available to plugin factories, looked up by type.
///
/// Services are registered as cloneable handles (typically
/// `Arc<dyn Trait>`); a factory asks for exactly the types it declares and
/// either gets fully injected or fails.
pub struct ServiceContext {
    /// Service type → boxed handle.
    services: DashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ServiceContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    /// Registers a service handle, replacing any previous handle of the same
    /// type.
    pub fn register<S>(&self, service: S)
    where
        S: Clone + Send + Sync + 'static,
    {
        debug!(service = std::any::type_name::<S>(), "Service registered");
        self.services.insert(TypeId::of::<S>(), Box::new(service));
    }

    /// Looks up a service handle by type.
    pub fn get<S>(&self) -> Option<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.services
            .get(&TypeId::of::<S>())
            .and_then(|entry| entry.value().downcast_ref::<S>().cloned())
    }

    /// Looks up a service handle by type, failing if absent.
    pub fn require<S>(&self) -> RuntimeResult<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.get::<S>().ok_or_else(|| {
            RuntimeError::not_found(format!(
                "No service registered for type '{}'",
                std::any::type_name::<S>()
            ))
        })
    }

    /// Checks whether a service of the given type is registered.
    pub fn contains<S>(&self) -> bool
    where
        S: Clone + Send + Sync + 'static,
    {
        self.services.contains_key(&TypeId::of::<S>())
    }

    /// Returns the number of registered services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns whether no services are registered.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("services", &self.services.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    trait Clock: Send + Sync + std::fmt::Debug {
        fn now(&self) -> u64;
    }

    #[derive(Debug)]
    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_register_and_get_trait_object() {
        let context = ServiceContext::new();
        context.register::<Arc<dyn Clock>>(Arc::new(FixedClock(42)));

        let clock = context.get::<Arc<dyn Clock>>().unwrap();
        assert_eq!(clock.now(), 42);
        assert!(context.contains::<Arc<dyn Clock>>());
    }

    #[test]
    fn test_require_missing_service_fails() {
        let context = ServiceContext::new();
        let err = context.require::<Arc<dyn Clock>>().unwrap_err();
        assert_eq!(err.kind, manifold_core::error::ErrorKind::NotFound);
    }

    #[test]
    fn test_register_replaces_same_type() {
        let context = ServiceContext::new();
        context.register::<Arc<dyn Clock>>(Arc::new(FixedClock(1)));
        context.register::<Arc<dyn Clock>>(Arc::new(FixedClock(2)));

        assert_eq!(context.len(), 1);
        assert_eq!(context.get::<Arc<dyn Clock>>().unwrap().now(), 2);
    }
}
