//! Service registry
//!
//! Append-only mapping from `(service, location)` to a factory. The registry
//! is populated by a single writer during the registration/scanning phase,
//! then frozen behind `Arc` and shared read-only with every container. That
//! phase barrier is established by the embedding application, not by a lock.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::factory::Factory;
use crate::location::Location;
use crate::service::ServiceKey;

#[derive(Clone, PartialEq, Eq, Hash)]
struct BindingKey {
    service: ServiceKey,
    location: Location,
}

/// Registry of factories keyed by `(service, location)`
///
/// Re-registering an existing key silently replaces the prior entry: last
/// write wins. Callers must treat an overwrite as an intentional override,
/// never an error.
#[derive(Default)]
pub struct ServiceRegistry {
    bindings: HashMap<BindingKey, Arc<Factory>>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under its own `(service, location)` metadata
    ///
    /// Overwriting an existing key is accepted silently (logged at debug).
    pub fn register(&mut self, factory: Factory) {
        let key = BindingKey {
            service: factory.provides(),
            location: factory.location().clone(),
        };
        let service = factory.provides();
        let location = factory.location().clone();
        if self.bindings.insert(key, Arc::new(factory)).is_some() {
            debug!(service = %service, location = %location, "replaced existing binding");
        } else {
            debug!(service = %service, location = %location, "registered binding");
        }
    }

    /// The factory registered at exactly `(service, location)`, if any
    pub fn lookup(&self, service: ServiceKey, location: &Location) -> Option<Arc<Factory>> {
        self.bindings
            .get(&BindingKey {
                service,
                location: location.clone(),
            })
            .map(Arc::clone)
    }

    /// The factory at the longest registered prefix of `location`
    ///
    /// Walks the fallback chain from `location` up to the root, one level per
    /// hop, and returns the first match together with the location it was
    /// registered at. Prefixes of a path are totally ordered by length, so
    /// there are no ties.
    pub fn lookup_nearest(
        &self,
        service: ServiceKey,
        location: &Location,
    ) -> Option<(Arc<Factory>, Location)> {
        location
            .ancestors()
            .find_map(|ancestor| self.lookup(service, &ancestor).map(|f| (f, ancestor)))
    }

    /// Whether `(service, location)` is registered exactly
    pub fn contains(&self, service: ServiceKey, location: &Location) -> bool {
        self.bindings.contains_key(&BindingKey {
            service,
            location: location.clone(),
        })
    }

    /// Number of registered bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry holds no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All registered `(service, location)` keys, for diagnostics
    pub fn bindings(&self) -> Vec<(ServiceKey, Location)> {
        self.bindings
            .keys()
            .map(|k| (k.service, k.location.clone()))
            .collect()
    }

    /// Freeze the registry for the read-only phase
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
