//! Per-container instance cache
//!
//! Thread-safe cache from `(service, matched location)` to the resolved
//! instance, backed by `DashMap`. Keys use the location a binding was
//! *registered* at, so sibling requests that fall back to the same binding
//! share one instance.
//!
//! Concurrency contract: reads clone the `Arc` out of the shard guard and
//! drop the guard immediately; computation always happens outside any guard
//! (factories recurse into the container and must not run under a shard
//! lock). Two threads racing on the same key may both compute, and the last
//! write wins. Factories are side-effect-free by contract, so the duplicate
//! computation is accepted; the map itself can never hold a partially
//! constructed value.

use dashmap::DashMap;
use tracing::trace;

use crate::error::Result;
use crate::location::Location;
use crate::service::{BoxedInstance, ServiceKey};

#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    service: ServiceKey,
    location: Location,
}

impl CacheKey {
    pub(crate) fn new(service: ServiceKey, location: Location) -> Self {
        Self { service, location }
    }
}

/// Cache of resolved instances, scoped to one container
#[derive(Default)]
pub struct InstanceCache {
    entries: DashMap<CacheKey, BoxedInstance>,
}

impl InstanceCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, key: &CacheKey) -> Option<BoxedInstance> {
        let hit = self.entries.get(key).map(|entry| entry.value().clone());
        if hit.is_some() {
            trace!(service = %key.service, location = %key.location, "cache hit");
        }
        hit
    }

    pub(crate) fn insert(&self, key: CacheKey, instance: BoxedInstance) -> BoxedInstance {
        trace!(service = %key.service, location = %key.location, "cache store");
        self.entries.insert(key, instance.clone());
        instance
    }

    /// Return the cached instance for `key`, computing and storing it on miss
    ///
    /// `compute` runs outside any map guard. Under a same-key race each
    /// caller may compute; whichever write lands last is what later readers
    /// observe.
    pub(crate) fn get_or_try_insert_with<F>(&self, key: CacheKey, compute: F) -> Result<BoxedInstance>
    where
        F: FnOnce() -> Result<BoxedInstance>,
    {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let instance = compute()?;
        Ok(self.insert(key, instance))
    }

    /// Number of cached instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
