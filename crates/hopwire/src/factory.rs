//! Factories and their declared parameter tables
//!
//! A [`Factory`] carries its own registration metadata (service key and
//! location), a static table of declared parameters, and a construct closure.
//! The parameter table is built once when the factory is declared; nothing is
//! inspected per call. Each parameter states how it is bound:
//!
//! | Binding | Bound from |
//! |---|---|
//! | [`Binding::Injected`] | the registry (overridable by name) |
//! | [`Binding::Value`] | a caller override, required |
//! | [`Binding::Defaulted`] | a caller override, falling back to a default |

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::Result;
use crate::location::Location;
use crate::service::{BoxedInstance, BoxedValue, ResolvedArgs, ServiceKey};

/// Default value producer for a [`Binding::Defaulted`] parameter
pub type DefaultFn = Arc<dyn Fn() -> BoxedValue + Send + Sync>;

/// How a declared parameter gets its value
#[derive(Clone)]
pub enum Binding {
    /// Resolve the parameter from the registry as a service dependency
    Injected(ServiceKey),
    /// The caller must supply the parameter as a keyword override
    Value,
    /// Use a default value unless a keyword override is supplied
    Defaulted(DefaultFn),
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Injected(key) => f.debug_tuple("Injected").field(&key.name()).finish(),
            Self::Value => f.write_str("Value"),
            Self::Defaulted(_) => f.write_str("Defaulted"),
        }
    }
}

/// One entry in a factory's declared parameter table
#[derive(Clone, Debug)]
pub struct Param {
    name: &'static str,
    binding: Binding,
}

impl Param {
    /// Declare an injected service dependency
    pub fn injected<T: ?Sized + Send + Sync + 'static>(name: &'static str) -> Self {
        Self {
            name,
            binding: Binding::Injected(ServiceKey::of::<T>()),
        }
    }

    /// Declare a caller-supplied value parameter
    pub fn value(name: &'static str) -> Self {
        Self {
            name,
            binding: Binding::Value,
        }
    }

    /// Declare a parameter with a default value
    pub fn defaulted<V: Clone + Send + Sync + 'static>(name: &'static str, default: V) -> Self {
        Self {
            name,
            binding: Binding::Defaulted(Arc::new(move || Arc::new(default.clone()))),
        }
    }

    /// The parameter name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// How the parameter is bound
    pub fn binding(&self) -> &Binding {
        &self.binding
    }
}

/// Synchronous construct closure
pub type SyncConstruct = Arc<dyn Fn(ResolvedArgs) -> Result<BoxedInstance> + Send + Sync>;

/// Asynchronous construct closure
pub type AsyncConstruct =
    Arc<dyn Fn(ResolvedArgs) -> BoxFuture<'static, Result<BoxedInstance>> + Send + Sync>;

/// A factory's construct closure, sync or async
///
/// Synchronous constructs run inline on both resolution paths. Asynchronous
/// constructs can only be run by the async path; a sync resolution that
/// reaches one fails with `Error::AsyncFactory`.
#[derive(Clone)]
pub enum Construct {
    /// Construct runs synchronously
    Sync(SyncConstruct),
    /// Construct suspends at its own await points
    Async(AsyncConstruct),
}

impl fmt::Debug for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Sync"),
            Self::Async(_) => f.write_str("Async"),
        }
    }
}

/// Constructor for a service instance, with registration metadata attached
///
/// A factory is a fully-formed unit: the registry either holds one for a
/// `(service, location)` key or holds nothing. Factories are immutable once
/// built and shared behind `Arc`.
#[derive(Clone)]
pub struct Factory {
    provides: ServiceKey,
    location: Location,
    params: Vec<Param>,
    construct: Construct,
}

impl Factory {
    /// Start declaring a factory for the service type `T`
    pub fn for_service<T: ?Sized + Send + Sync + 'static>() -> FactoryBuilder<T> {
        FactoryBuilder {
            location: Location::root(),
            params: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// The service key this factory produces
    pub fn provides(&self) -> ServiceKey {
        self.provides
    }

    /// The location this factory is registered at
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The declared parameter table
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Whether a declared parameter with this name exists
    pub fn declares_param(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name() == name)
    }

    pub(crate) fn construct(&self) -> &Construct {
        &self.construct
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("provides", &self.provides.name())
            .field("location", &self.location.to_string())
            .field("params", &self.params)
            .field("construct", &self.construct)
            .finish()
    }
}

/// Builder for [`Factory`]
///
/// Finish with [`provide`](FactoryBuilder::provide) for a synchronous
/// construct or [`provide_async`](FactoryBuilder::provide_async) for an
/// asynchronous one.
pub struct FactoryBuilder<T: ?Sized> {
    location: Location,
    params: Vec<Param>,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized + Send + Sync + 'static> FactoryBuilder<T> {
    /// Scope the registration to a location (default: global)
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Add a declared parameter
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Finish with a synchronous construct closure
    pub fn provide<F>(self, construct: F) -> Factory
    where
        F: Fn(&ResolvedArgs) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        Factory {
            provides: ServiceKey::of::<T>(),
            location: self.location,
            params: self.params,
            construct: Construct::Sync(Arc::new(move |args| {
                let instance = construct(&args)?;
                Ok(Arc::new(instance) as BoxedInstance)
            })),
        }
    }

    /// Finish with an asynchronous construct closure
    pub fn provide_async<F, Fut>(self, construct: F) -> Factory
    where
        F: Fn(ResolvedArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<T>>> + Send + 'static,
    {
        Factory {
            provides: ServiceKey::of::<T>(),
            location: self.location,
            params: self.params,
            construct: Construct::Async(Arc::new(move |args| {
                let fut = construct(args);
                Box::pin(async move {
                    let instance = fut.await?;
                    Ok(Arc::new(instance) as BoxedInstance)
                })
            })),
        }
    }
}
