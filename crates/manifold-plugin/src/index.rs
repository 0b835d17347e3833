//! Plugin index — the capability-keyed registry with priority ordering.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use tokio::sync::RwLock;
use tracing::info;

use manifold_core::result::RuntimeResult;

use crate::descriptor::{Capability, PluginDescriptor};

/// Entry in the index.
#[derive(Debug, Clone)]
struct RegisteredPlugin {
    /// The descriptor.
    descriptor: PluginDescriptor,
    /// Discovery sequence number, the stable tie-break for equal
    /// priorities.
    seq: u64,
}

/// Registry mapping each capability to its descriptors, sorted descending by
/// priority.
///
/// Shared, read-mostly state: many module executions read concurrently while
/// plugins occasionally register or unregister. Writers re-sort only the
/// affected capability bucket; readers receive defensive snapshots, so an
/// iteration in flight is unaffected by concurrent registration. Equal
/// priorities keep their registration order rather than any identity order,
/// so the resolved sequence is reproducible across runs.
#[derive(Debug)]
pub struct PluginIndex {
    /// Capability → sorted descriptors.
    buckets: RwLock<HashMap<Capability, Vec<RegisteredPlugin>>>,
    /// Next discovery sequence number.
    next_seq: AtomicU64,
}

impl PluginIndex {
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Registers a descriptor, replacing any existing descriptor with the
    /// same `(capability, name)` identity.
    ///
    /// A replaced descriptor keeps its original discovery sequence number,
    /// so re-registration moves it only as far as its new priority demands.
    /// Malformed descriptors are rejected with `InvalidDescriptor` and the
    /// index is left unchanged.
    pub async fn register(&self, descriptor: PluginDescriptor) -> RuntimeResult<()> {
        descriptor.validate()?;

        let capability = descriptor.capability;
        let name = descriptor.name.clone();
        let priority = descriptor.priority;

        let mut buckets = self.buckets.write().await;
        let bucket = buckets.entry(capability).or_default();

        match bucket.iter().position(|entry| entry.descriptor.name == name) {
            Some(pos) => {
                let seq = bucket[pos].seq;
                bucket[pos] = RegisteredPlugin { descriptor, seq };
            }
            None => {
                let seq = self.next_seq.fetch_add(1, AtomicOrdering::Relaxed);
                bucket.push(RegisteredPlugin { descriptor, seq });
            }
        }

        bucket.sort_by(|a, b| {
            b.descriptor
                .priority
                .total_cmp(&a.descriptor.priority)
                .then(a.seq.cmp(&b.seq))
        });

        info!(
            capability = %capability,
            plugin = %name,
            priority = %priority,
            "Plugin registered"
        );

        Ok(())
    }

    /// Removes a descriptor by identity, returning it if present.
    pub async fn unregister(
        &self,
        capability: Capability,
        name: &str,
    ) -> Option<PluginDescriptor> {
        let mut buckets = self.buckets.write().await;
        let bucket = buckets.get_mut(&capability)?;
        let pos = bucket
            .iter()
            .position(|entry| entry.descriptor.name == name)?;
        let removed = bucket.remove(pos);

        info!(capability = %capability, plugin = %name, "Plugin unregistered");

        Some(removed.descriptor)
    }

    /// Returns a snapshot of all descriptors for a capability, sorted
    /// descending by priority.
    ///
    /// An unknown capability yields an empty sequence — absence is normal,
    /// not exceptional.
    pub async fn plugins(&self, capability: Capability) -> Vec<PluginDescriptor> {
        let buckets = self.buckets.read().await;
        buckets
            .get(&capability)
            .map(|bucket| {
                bucket
                    .iter()
                    .map(|entry| entry.descriptor.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the filtered, still-ordered subsequence of descriptors for a
    /// capability.
    pub async fn plugins_where(
        &self,
        capability: Capability,
        predicate: impl Fn(&PluginDescriptor) -> bool,
    ) -> Vec<PluginDescriptor> {
        let buckets = self.buckets.read().await;
        buckets
            .get(&capability)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|entry| predicate(&entry.descriptor))
                    .map(|entry| entry.descriptor.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the enabled descriptors for a capability, in order.
    pub async fn enabled_plugins(&self, capability: Capability) -> Vec<PluginDescriptor> {
        self.plugins_where(capability, |descriptor| descriptor.enabled)
            .await
    }

    /// Returns the number of descriptors registered for a capability.
    pub async fn count(&self, capability: Capability) -> usize {
        let buckets = self.buckets.read().await;
        buckets.get(&capability).map(Vec::len).unwrap_or(0)
    }

    /// Checks whether a descriptor with the given identity is registered.
    pub async fn contains(&self, capability: Capability, name: &str) -> bool {
        let buckets = self.buckets.read().await;
        buckets
            .get(&capability)
            .map(|bucket| bucket.iter().any(|entry| entry.descriptor.name == name))
            .unwrap_or(false)
    }

    /// Returns the capabilities with at least one registered descriptor.
    pub async fn capabilities(&self) -> Vec<Capability> {
        let buckets = self.buckets.read().await;
        buckets
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(capability, _)| *capability)
            .collect()
    }
}

impl Default for PluginIndex {
    fn default() -> Self {
        Self::new()
    }
}
