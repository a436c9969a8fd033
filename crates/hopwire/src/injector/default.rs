//! Marker-based injector without override handling

use async_trait::async_trait;

use super::{AsyncInjector, Injector, bind_args, bind_args_async, run_construct, run_construct_async};
use crate::container::Container;
use crate::error::{Error, Result};
use crate::factory::Factory;
use crate::location::Location;
use crate::service::{BoxedInstance, Overrides};

/// Injector that binds only explicitly marked parameters
///
/// Injected parameters resolve via the registry at the global location;
/// defaulted parameters take their defaults. Supplying overrides to this
/// strategy is an error; it declares no override handling, and silently
/// ignoring overrides would quietly violate the precedence invariant.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultInjector;

impl Injector for DefaultInjector {
    fn name(&self) -> &'static str {
        "default"
    }

    fn validate(&self, _factory: &Factory, overrides: &Overrides) -> Result<()> {
        if overrides.is_empty() {
            Ok(())
        } else {
            Err(Error::overrides_not_supported(self.name()))
        }
    }

    fn resolve(
        &self,
        factory: &Factory,
        container: &Container,
        _location: &Location,
        overrides: &Overrides,
    ) -> Result<BoxedInstance> {
        self.validate(factory, overrides)?;
        let args = bind_args(factory, container, &Location::root(), &Overrides::new())?;
        run_construct(factory, args)
    }
}

/// Async mirror of [`DefaultInjector`]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAsyncInjector;

#[async_trait]
impl AsyncInjector for DefaultAsyncInjector {
    fn name(&self) -> &'static str {
        "default"
    }

    fn validate(&self, _factory: &Factory, overrides: &Overrides) -> Result<()> {
        if overrides.is_empty() {
            Ok(())
        } else {
            Err(Error::overrides_not_supported(self.name()))
        }
    }

    async fn resolve(
        &self,
        factory: &Factory,
        container: &Container,
        _location: &Location,
        overrides: &Overrides,
    ) -> Result<BoxedInstance> {
        self.validate(factory, overrides)?;
        let args = bind_args_async(factory, container, &Location::root(), &Overrides::new()).await?;
        run_construct_async(factory, args).await
    }
}
