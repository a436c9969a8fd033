//! Context-aware service location
//!
//! The locator implements the longest-prefix-match algorithm over the
//! registry: given a requested location `L` and service `T`, it finds the
//! maximal-length prefix `L'` of `L` such that `(T, L')` is registered.
//! Evaluation happens once per request and is never cached across locations,
//! since the same service may resolve differently per location.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::factory::Factory;
use crate::location::Location;
use crate::registry::ServiceRegistry;
use crate::service::ServiceKey;

/// Longest-prefix resolver over a frozen registry
pub struct ServiceLocator<'a> {
    registry: &'a ServiceRegistry,
}

impl<'a> ServiceLocator<'a> {
    /// Create a locator over the given registry
    pub fn new(registry: &'a ServiceRegistry) -> Self {
        Self { registry }
    }

    /// Locate the most specific binding for `service` at `location`
    ///
    /// Returns the factory and the location it was registered at. Fails with
    /// [`Error::LocationUnresolved`] when no prefix (including the global
    /// location) has a matching registration.
    pub fn locate(
        &self,
        service: ServiceKey,
        location: &Location,
    ) -> Result<(Arc<Factory>, Location)> {
        self.registry
            .lookup_nearest(service, location)
            .ok_or_else(|| Error::location_unresolved(service.name(), location.to_string()))
    }

    /// Locate bindings for several services at once, in request order
    ///
    /// Batch lookups may not carry keyword overrides; that rule is enforced
    /// at the container boundary before this is called.
    pub fn locate_many(
        &self,
        services: &[ServiceKey],
        location: &Location,
    ) -> Result<Vec<(Arc<Factory>, Location)>> {
        services
            .iter()
            .map(|service| self.locate(*service, location))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::Factory;

    struct Svc;
    struct Other;

    fn registry_with(locations: &[&str]) -> ServiceRegistry {
        let mut registry = ServiceRegistry::new();
        for loc in locations {
            let parsed = Location::parse(loc).unwrap();
            registry.register(
                Factory::for_service::<Svc>()
                    .at(parsed)
                    .provide(|_| Ok(Arc::new(Svc))),
            );
        }
        registry
    }

    #[test]
    fn locate_walks_to_nearest_prefix() {
        let registry = registry_with(&["", "a", "a/b"]);
        let locator = ServiceLocator::new(&registry);
        let key = ServiceKey::of::<Svc>();

        let (_, matched) = locator
            .locate(key, &Location::parse("a/b/c").unwrap())
            .unwrap();
        assert_eq!(matched, Location::parse("a/b").unwrap());

        let (_, matched) = locator.locate(key, &Location::parse("x").unwrap()).unwrap();
        assert_eq!(matched, Location::root());
    }

    #[test]
    fn locate_fails_when_chain_is_exhausted() {
        let registry = registry_with(&["a"]);
        let locator = ServiceLocator::new(&registry);
        let result = locator.locate(ServiceKey::of::<Svc>(), &Location::parse("x").unwrap());
        assert!(matches!(result, Err(Error::LocationUnresolved { .. })));
    }

    #[test]
    fn locate_many_preserves_request_order() {
        let mut registry = registry_with(&[""]);
        registry.register(Factory::for_service::<Other>().provide(|_| Ok(Arc::new(Other))));
        let locator = ServiceLocator::new(&registry);

        let keys = [ServiceKey::of::<Other>(), ServiceKey::of::<Svc>()];
        let located = locator.locate_many(&keys, &Location::root()).unwrap();
        assert_eq!(located.len(), 2);
        assert_eq!(located[0].0.provides(), ServiceKey::of::<Other>());
        assert_eq!(located[1].0.provides(), ServiceKey::of::<Svc>());
    }

    #[test]
    fn locate_many_fails_fast_on_any_miss() {
        let registry = registry_with(&[""]);
        let locator = ServiceLocator::new(&registry);
        let keys = [ServiceKey::of::<Svc>(), ServiceKey::of::<Other>()];
        assert!(locator.locate_many(&keys, &Location::root()).is_err());
    }
}
