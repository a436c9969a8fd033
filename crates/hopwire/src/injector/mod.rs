//! Injector strategy family
//!
//! An injector binds a factory's declared parameters using the container's
//! registry and the caller's keyword overrides, then runs the construct.
//! Strategies differ in how parameters are discovered and ranked:
//!
//! - [`DefaultInjector`]: marker-based binding at the global location only;
//!   declares no override handling.
//! - [`KeywordInjector`]: superset of the default strategy; caller overrides
//!   always win over any registry-resolved or defaulted value.
//! - [`HopscotchInjector`]: injected parameters resolve at
//!   the request location, hopping one level up per miss until the hierarchy
//!   is exhausted.
//!
//! Each strategy has an async mirror with identical resolution semantics that
//! additionally awaits asynchronous constructs. Injectors are stateless and
//! safely shared by reference across all callers and threads.

mod default;
mod hopscotch;
mod keyword;

pub use default::{DefaultAsyncInjector, DefaultInjector};
pub use hopscotch::{HopscotchAsyncInjector, HopscotchInjector};
pub use keyword::{KeywordAsyncInjector, KeywordInjector};

use async_trait::async_trait;

use crate::container::Container;
use crate::error::{Error, Result};
use crate::factory::{Binding, Construct, Factory};
use crate::location::Location;
use crate::service::{BoxedInstance, Overrides, ResolvedArgs};

/// Synchronous injector strategy
///
/// Pure function of `(factory, container, location, overrides)`; holds no
/// per-call mutable state.
pub trait Injector: Send + Sync {
    /// Strategy name, for diagnostics
    fn name(&self) -> &'static str;

    /// Check the supplied overrides against the factory's declared parameters
    ///
    /// Runs at the call boundary, before the cache is probed, so a warm
    /// cache never masks an invalid override set.
    fn validate(&self, factory: &Factory, overrides: &Overrides) -> Result<()> {
        validate_overrides(factory, overrides)
    }

    /// Bind the factory's parameters and run its construct
    fn resolve(
        &self,
        factory: &Factory,
        container: &Container,
        location: &Location,
        overrides: &Overrides,
    ) -> Result<BoxedInstance>;
}

/// Asynchronous injector strategy
///
/// Identical resolution semantics to [`Injector`], awaiting any asynchronous
/// constructs along the way.
#[async_trait]
pub trait AsyncInjector: Send + Sync {
    /// Strategy name, for diagnostics
    fn name(&self) -> &'static str;

    /// Check the supplied overrides against the factory's declared parameters
    ///
    /// Runs at the call boundary, before the cache is probed, so a warm
    /// cache never masks an invalid override set.
    fn validate(&self, factory: &Factory, overrides: &Overrides) -> Result<()> {
        validate_overrides(factory, overrides)
    }

    /// Bind the factory's parameters and run its construct
    async fn resolve(
        &self,
        factory: &Factory,
        container: &Container,
        location: &Location,
        overrides: &Overrides,
    ) -> Result<BoxedInstance>;
}

/// Reject override names that the factory does not declare
///
/// Mismatches are caught at the call boundary, before any resolution work.
pub(crate) fn validate_overrides(factory: &Factory, overrides: &Overrides) -> Result<()> {
    for name in overrides.names() {
        if !factory.declares_param(name) {
            return Err(Error::unknown_override(factory.provides().name(), name));
        }
    }
    Ok(())
}

/// Bind the parameter table synchronously
///
/// Precedence per parameter: override, then binding (injected lookup or
/// default), then failure. Injected dependencies resolve at `dep_location`.
pub(crate) fn bind_args(
    factory: &Factory,
    container: &Container,
    dep_location: &Location,
    overrides: &Overrides,
) -> Result<ResolvedArgs> {
    let mut args = ResolvedArgs::new(factory.provides().name());
    for param in factory.params() {
        if let Some(value) = overrides.get_raw(param.name()) {
            args.insert(param.name(), value);
            continue;
        }
        match param.binding() {
            Binding::Injected(dep) => {
                let instance = container.resolve_erased(*dep, dep_location, &Overrides::new())?;
                args.insert(param.name(), instance);
            }
            Binding::Defaulted(default) => args.insert(param.name(), default()),
            Binding::Value => {
                return Err(Error::missing_param(
                    factory.provides().name(),
                    param.name(),
                ));
            }
        }
    }
    Ok(args)
}

/// Bind the parameter table, awaiting injected dependencies
pub(crate) async fn bind_args_async(
    factory: &Factory,
    container: &Container,
    dep_location: &Location,
    overrides: &Overrides,
) -> Result<ResolvedArgs> {
    let mut args = ResolvedArgs::new(factory.provides().name());
    for param in factory.params() {
        if let Some(value) = overrides.get_raw(param.name()) {
            args.insert(param.name(), value);
            continue;
        }
        match param.binding() {
            Binding::Injected(dep) => {
                let instance = container
                    .resolve_erased_async(*dep, dep_location, &Overrides::new())
                    .await?;
                args.insert(param.name(), instance);
            }
            Binding::Defaulted(default) => args.insert(param.name(), default()),
            Binding::Value => {
                return Err(Error::missing_param(
                    factory.provides().name(),
                    param.name(),
                ));
            }
        }
    }
    Ok(args)
}

/// Run a construct on the synchronous path
pub(crate) fn run_construct(factory: &Factory, args: ResolvedArgs) -> Result<BoxedInstance> {
    match factory.construct() {
        Construct::Sync(construct) => construct(args),
        Construct::Async(_) => Err(Error::async_factory(factory.provides().name())),
    }
}

/// Run a construct on the asynchronous path
pub(crate) async fn run_construct_async(
    factory: &Factory,
    args: ResolvedArgs,
) -> Result<BoxedInstance> {
    match factory.construct() {
        Construct::Sync(construct) => construct(args),
        Construct::Async(construct) => construct(args).await,
    }
}
