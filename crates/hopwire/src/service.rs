//! Service identity and type erasure
//!
//! Services are identified by [`ServiceKey`], an identity-based key built
//! from `TypeId` (equality is never structural). Stored instances follow one
//! erasure convention throughout the crate: a [`BoxedInstance`] is an
//! `Arc<dyn Any>` whose concrete payload is `Arc<T>` for the service type
//! `T`. Wrapping the `Arc` itself (rather than the value) is what lets
//! unsized service types such as `dyn Trait + Send + Sync` ride through the
//! same machinery.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Type-erased service instance; payload is `Arc<T>`
pub type BoxedInstance = Arc<dyn Any + Send + Sync>;

/// Type-erased parameter value; payload is the value itself
pub type BoxedValue = Arc<dyn Any + Send + Sync>;

/// Opaque identifier for an abstract service capability
///
/// Equality and hashing use only the `TypeId`; the type name is carried for
/// diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct ServiceKey {
    type_id: TypeId,
    name: &'static str,
}

impl ServiceKey {
    /// Key for the service type `T`
    ///
    /// `T` may be unsized (`dyn Trait + Send + Sync`).
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The service type name, for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Downcast a stored instance back to `Arc<T>`
pub(crate) fn downcast<T: ?Sized + Send + Sync + 'static>(
    service: ServiceKey,
    instance: &BoxedInstance,
) -> Result<Arc<T>> {
    instance
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(|| Error::type_mismatch(service.name(), std::any::type_name::<T>()))
}

/// Keyword overrides supplied by the caller at resolution time
///
/// An explicit typed map of values per parameter name, validated at the call
/// boundary against the factory's declared parameter set. Overrides always
/// take precedence over registry-resolved or defaulted values.
#[derive(Clone, Default)]
pub struct Overrides {
    values: HashMap<&'static str, BoxedValue>,
}

impl Overrides {
    /// Create an empty override set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override value for the named parameter
    ///
    /// For a parameter declared as injected, the override value should be the
    /// `Arc<T>` the factory expects; plain parameters take the value type
    /// directly.
    pub fn with<V: Send + Sync + 'static>(mut self, name: &'static str, value: V) -> Self {
        self.values.insert(name, Arc::new(value));
        self
    }

    /// Whether no overrides were supplied
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of overrides supplied
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over the override parameter names
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    /// The raw erased value for a parameter name, if present
    pub(crate) fn get_raw(&self, name: &str) -> Option<BoxedValue> {
        self.values.get(name).map(Arc::clone)
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

/// Fully bound arguments handed to a factory's construct closure
///
/// Built by an injector once per resolution; the construct closure pulls each
/// declared parameter out by name.
pub struct ResolvedArgs {
    service: &'static str,
    values: HashMap<&'static str, BoxedValue>,
}

impl ResolvedArgs {
    pub(crate) fn new(service: &'static str) -> Self {
        Self {
            service,
            values: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: BoxedValue) {
        self.values.insert(name, value);
    }

    /// Typed access to a bound parameter value
    pub fn get<V: Clone + Send + Sync + 'static>(&self, name: &str) -> Result<V> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| Error::missing_param(self.service, name))?;
        value
            .downcast_ref::<V>()
            .cloned()
            .ok_or_else(|| Error::type_mismatch(self.service, std::any::type_name::<V>()))
    }

    /// Typed access to an injected service parameter
    ///
    /// Equivalent to `get::<Arc<T>>(name)`, spelled for unsized service types.
    pub fn service<T: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>> {
        self.get::<Arc<T>>(name)
    }
}
