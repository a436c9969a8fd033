//! Override-aware injector (the default container strategy)

use async_trait::async_trait;

use super::{
    AsyncInjector, Injector, bind_args, bind_args_async, run_construct, run_construct_async,
};
use crate::container::Container;
use crate::error::Result;
use crate::factory::Factory;
use crate::location::Location;
use crate::service::{BoxedInstance, Overrides};

/// Superset of the default strategy that accepts keyword overrides
///
/// Overrides always win over any registry-resolved or defaulted value for
/// the same parameter name. Override names are validated against the
/// factory's declared parameter set before any resolution work. Injected
/// parameters without an override resolve at the global location.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordInjector;

impl Injector for KeywordInjector {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn resolve(
        &self,
        factory: &Factory,
        container: &Container,
        _location: &Location,
        overrides: &Overrides,
    ) -> Result<BoxedInstance> {
        self.validate(factory, overrides)?;
        let args = bind_args(factory, container, &Location::root(), overrides)?;
        run_construct(factory, args)
    }
}

/// Async mirror of [`KeywordInjector`]
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordAsyncInjector;

#[async_trait]
impl AsyncInjector for KeywordAsyncInjector {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn resolve(
        &self,
        factory: &Factory,
        container: &Container,
        _location: &Location,
        overrides: &Overrides,
    ) -> Result<BoxedInstance> {
        self.validate(factory, overrides)?;
        let args = bind_args_async(factory, container, &Location::root(), overrides).await?;
        run_construct_async(factory, args).await
    }
}
