//! Location-aware ("hopscotch") injector

use async_trait::async_trait;

use super::{
    AsyncInjector, Injector, bind_args, bind_args_async, run_construct, run_construct_async,
};
use crate::container::Container;
use crate::error::Result;
use crate::factory::Factory;
use crate::location::Location;
use crate::service::{BoxedInstance, Overrides};

/// Override-aware injector that resolves dependencies at the request location
///
/// Injected parameters ask the locator for the most specific binding at the
/// current location, hopping up the hierarchy one level at a time toward the
/// global location. An exhausted chain surfaces `Error::LocationUnresolved`.
/// Override precedence is identical to [`super::KeywordInjector`].
#[derive(Debug, Default, Clone, Copy)]
pub struct HopscotchInjector;

impl Injector for HopscotchInjector {
    fn name(&self) -> &'static str {
        "hopscotch"
    }

    fn resolve(
        &self,
        factory: &Factory,
        container: &Container,
        location: &Location,
        overrides: &Overrides,
    ) -> Result<BoxedInstance> {
        self.validate(factory, overrides)?;
        let args = bind_args(factory, container, location, overrides)?;
        run_construct(factory, args)
    }
}

/// Async mirror of [`HopscotchInjector`]
#[derive(Debug, Default, Clone, Copy)]
pub struct HopscotchAsyncInjector;

#[async_trait]
impl AsyncInjector for HopscotchAsyncInjector {
    fn name(&self) -> &'static str {
        "hopscotch"
    }

    async fn resolve(
        &self,
        factory: &Factory,
        container: &Container,
        location: &Location,
        overrides: &Overrides,
    ) -> Result<BoxedInstance> {
        self.validate(factory, overrides)?;
        let args = bind_args_async(factory, container, location, overrides).await?;
        run_construct_async(factory, args).await
    }
}
