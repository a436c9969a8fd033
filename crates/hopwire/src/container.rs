//! Per-scope container
//!
//! A [`Container`] composes a frozen registry, a sync and an async injector
//! strategy, and an instance cache. One container per logical request or
//! scope; containers never share cache state. Discard the container at scope
//! end; there is no eviction, the scope bounds the cache's lifetime.
//!
//! Resolution flow: locate the factory (exact binding for global requests,
//! longest-prefix chain for located ones) → validate the overrides against
//! the factory's declared parameters → probe the cache under
//! `(service, matched location)` → bind parameters via the injector → run
//! the construct → store and return.

use std::sync::Arc;

use tracing::trace;

use crate::cache::{CacheKey, InstanceCache};
use crate::error::{Error, Result};
use crate::factory::Factory;
use crate::injector::{
    AsyncInjector, DefaultAsyncInjector, DefaultInjector, Injector, KeywordAsyncInjector,
    KeywordInjector,
};
use crate::location::Location;
use crate::locator::ServiceLocator;
use crate::registry::ServiceRegistry;
use crate::service::{self, BoxedInstance, Overrides, ServiceKey};

/// Per-scope composition of registry, injectors, and cache
pub struct Container {
    registry: Arc<ServiceRegistry>,
    injector: Option<Arc<dyn Injector>>,
    async_injector: Option<Arc<dyn AsyncInjector>>,
    cache: InstanceCache,
}

impl Container {
    /// Start building a container over a frozen registry
    ///
    /// Defaults to the keyword strategies for both resolution paths.
    pub fn builder(registry: Arc<ServiceRegistry>) -> ContainerBuilder {
        ContainerBuilder {
            registry,
            injector: Some(Arc::new(KeywordInjector)),
            async_injector: Some(Arc::new(KeywordAsyncInjector)),
        }
    }

    /// The registry this container resolves against
    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    /// Number of instances cached so far
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Resolve a service at the global location
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.get_with::<T>(Overrides::new())
    }

    /// Resolve a service at the global location with keyword overrides
    pub fn get_with<T: ?Sized + Send + Sync + 'static>(
        &self,
        overrides: Overrides,
    ) -> Result<Arc<T>> {
        let key = ServiceKey::of::<T>();
        let instance = self.resolve_erased(key, &Location::root(), &overrides)?;
        service::downcast::<T>(key, &instance)
    }

    /// Resolve a service at a location, walking the prefix fallback chain
    pub fn get_at<T: ?Sized + Send + Sync + 'static>(&self, location: &Location) -> Result<Arc<T>> {
        self.get_at_with::<T>(location, Overrides::new())
    }

    /// Resolve a service at a location with keyword overrides
    pub fn get_at_with<T: ?Sized + Send + Sync + 'static>(
        &self,
        location: &Location,
        overrides: Overrides,
    ) -> Result<Arc<T>> {
        let key = ServiceKey::of::<T>();
        let instance = self.resolve_erased(key, location, &overrides)?;
        service::downcast::<T>(key, &instance)
    }

    /// Resolve several services in one call, in request order
    ///
    /// Batch requests may not carry overrides: with more than one target the
    /// overrides would be ambiguous, so a non-empty set is rejected with
    /// [`Error::AmbiguousOverride`] before any resolution work begins.
    pub fn get_many(
        &self,
        services: &[ServiceKey],
        overrides: Overrides,
    ) -> Result<Vec<BoxedInstance>> {
        if !overrides.is_empty() {
            return Err(Error::ambiguous_override(services.len(), overrides.len()));
        }
        services
            .iter()
            .map(|service| self.resolve_erased(*service, &Location::root(), &Overrides::new()))
            .collect()
    }

    /// Async mirror of [`get`](Container::get)
    pub async fn aget<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.aget_with::<T>(Overrides::new()).await
    }

    /// Async mirror of [`get_with`](Container::get_with)
    pub async fn aget_with<T: ?Sized + Send + Sync + 'static>(
        &self,
        overrides: Overrides,
    ) -> Result<Arc<T>> {
        let key = ServiceKey::of::<T>();
        let instance = self
            .resolve_erased_async(key, &Location::root(), &overrides)
            .await?;
        service::downcast::<T>(key, &instance)
    }

    /// Async mirror of [`get_at`](Container::get_at)
    pub async fn aget_at<T: ?Sized + Send + Sync + 'static>(
        &self,
        location: &Location,
    ) -> Result<Arc<T>> {
        self.aget_at_with::<T>(location, Overrides::new()).await
    }

    /// Async mirror of [`get_at_with`](Container::get_at_with)
    pub async fn aget_at_with<T: ?Sized + Send + Sync + 'static>(
        &self,
        location: &Location,
        overrides: Overrides,
    ) -> Result<Arc<T>> {
        let key = ServiceKey::of::<T>();
        let instance = self.resolve_erased_async(key, location, &overrides).await?;
        service::downcast::<T>(key, &instance)
    }

    /// Async mirror of [`get_many`](Container::get_many)
    pub async fn aget_many(
        &self,
        services: &[ServiceKey],
        overrides: Overrides,
    ) -> Result<Vec<BoxedInstance>> {
        if !overrides.is_empty() {
            return Err(Error::ambiguous_override(services.len(), overrides.len()));
        }
        let mut instances = Vec::with_capacity(services.len());
        for service in services {
            let instance = self
                .resolve_erased_async(*service, &Location::root(), &Overrides::new())
                .await?;
            instances.push(instance);
        }
        Ok(instances)
    }

    /// Locate the factory for a request and the location it matched at
    fn locate(
        &self,
        service: ServiceKey,
        location: &Location,
    ) -> Result<(Arc<Factory>, Location)> {
        if location.is_root() {
            let factory = self
                .registry
                .lookup(service, location)
                .ok_or_else(|| Error::missing_service(service.name()))?;
            Ok((factory, Location::root()))
        } else {
            ServiceLocator::new(&self.registry).locate(service, location)
        }
    }

    /// Type-erased synchronous resolution; the injectors recurse through this
    pub(crate) fn resolve_erased(
        &self,
        service: ServiceKey,
        location: &Location,
        overrides: &Overrides,
    ) -> Result<BoxedInstance> {
        if !overrides.is_empty() && self.injector.is_none() {
            return Err(Error::InjectorNotConfigured);
        }
        let (factory, matched) = self.locate(service, location)?;
        // Validated before the cache probe, so a warm cache never accepts an
        // override set a cold one would reject.
        match &self.injector {
            Some(injector) => injector.validate(&factory, overrides)?,
            None => DefaultInjector.validate(&factory, overrides)?,
        }
        trace!(service = %service, location = %location, matched = %matched, "resolving");
        self.cache
            .get_or_try_insert_with(CacheKey::new(service, matched), || match &self.injector {
                Some(injector) => injector.resolve(&factory, self, location, overrides),
                None => DefaultInjector.resolve(&factory, self, location, overrides),
            })
    }

    /// Type-erased asynchronous resolution
    pub(crate) async fn resolve_erased_async(
        &self,
        service: ServiceKey,
        location: &Location,
        overrides: &Overrides,
    ) -> Result<BoxedInstance> {
        if !overrides.is_empty() && self.async_injector.is_none() {
            return Err(Error::InjectorNotConfigured);
        }
        let (factory, matched) = self.locate(service, location)?;
        // Validated before the cache probe, so a warm cache never accepts an
        // override set a cold one would reject.
        match &self.async_injector {
            Some(injector) => injector.validate(&factory, overrides)?,
            None => DefaultAsyncInjector.validate(&factory, overrides)?,
        }
        trace!(service = %service, location = %location, matched = %matched, "resolving (async)");
        let cache_key = CacheKey::new(service, matched);
        if let Some(hit) = self.cache.get(&cache_key) {
            return Ok(hit);
        }
        // Computed outside any cache guard; a same-key race may duplicate
        // the computation and the last write wins.
        let instance = match &self.async_injector {
            Some(injector) => injector.resolve(&factory, self, location, overrides).await,
            None => {
                DefaultAsyncInjector
                    .resolve(&factory, self, location, overrides)
                    .await
            }
        }?;
        Ok(self.cache.insert(cache_key, instance))
    }
}

/// Builder for [`Container`]
pub struct ContainerBuilder {
    registry: Arc<ServiceRegistry>,
    injector: Option<Arc<dyn Injector>>,
    async_injector: Option<Arc<dyn AsyncInjector>>,
}

impl ContainerBuilder {
    /// Replace the synchronous injector strategy
    pub fn injector(mut self, injector: Arc<dyn Injector>) -> Self {
        self.injector = Some(injector);
        self
    }

    /// Replace the asynchronous injector strategy
    pub fn async_injector(mut self, injector: Arc<dyn AsyncInjector>) -> Self {
        self.async_injector = Some(injector);
        self
    }

    /// Bind no injectors at all
    ///
    /// A bare container still resolves marker-only factories through the
    /// default strategy semantics, but any supplied overrides fail with
    /// [`Error::InjectorNotConfigured`].
    pub fn bare(mut self) -> Self {
        self.injector = None;
        self.async_injector = None;
        self
    }

    /// Build the container
    pub fn build(self) -> Container {
        Container {
            registry: self.registry,
            injector: self.injector,
            async_injector: self.async_injector,
            cache: InstanceCache::new(),
        }
    }
}
