//! # hopwire
//!
//! Location-aware dependency-injection runtime: a registry maps abstract
//! service types to factories, injector strategies bind factory parameters
//! from the registry and caller overrides, and a per-container cache
//! memoizes resolved instances. Synchronous and asynchronous resolution have
//! identical semantics.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        Resolution Flow                         │
//! ├────────────────────────────────────────────────────────────────┤
//! │                                                                │
//! │  1. Factories register:  scan() / ServiceRegistry::register    │
//! │                               ↓                                │
//! │  2. Registry freezes:    Arc<ServiceRegistry> (read-only)      │
//! │                               ↓                                │
//! │  3. Container built:     registry + injectors + cache          │
//! │                               ↓                                │
//! │  4. Caller requests:     get::<T>() / get_at / aget / …        │
//! │                               ↓                                │
//! │  5. Locator matches:     longest registered prefix of location │
//! │                               ↓                                │
//! │  6. Injector binds:      overrides ≻ registry ≻ defaults       │
//! │                               ↓                                │
//! │  7. Cache stores:        (service, matched location) → Arc<T>  │
//! │                                                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use hopwire::{Container, Factory, Overrides, Param, ServiceRegistry};
//!
//! struct Config { url: String }
//! struct Client { config: Arc<Config> }
//!
//! let mut registry = ServiceRegistry::new();
//! registry.register(Factory::for_service::<Config>().provide(|_| {
//!     Ok(Arc::new(Config { url: "http://localhost".into() }))
//! }));
//! registry.register(
//!     Factory::for_service::<Client>()
//!         .param(Param::injected::<Config>("config"))
//!         .provide(|args| Ok(Arc::new(Client { config: args.service("config")? }))),
//! );
//!
//! let container = Container::builder(registry.into_shared()).build();
//! let client: Arc<Client> = container.get().unwrap();
//! assert_eq!(client.config.url, "http://localhost");
//! # let _ = Overrides::new();
//! ```
//!
//! Registration is single-writer: populate the registry (directly or via
//! [`scan`]) before freezing it; once containers exist the registry is
//! shared read-only and safe for unbounded concurrent readers.

pub mod cache;
pub mod container;
pub mod error;
pub mod factory;
pub mod injector;
pub mod location;
pub mod locator;
pub mod registry;
pub mod scan;
pub mod service;

pub use cache::InstanceCache;
pub use container::{Container, ContainerBuilder};
pub use error::{Error, Result};
pub use factory::{Binding, Construct, Factory, FactoryBuilder, Param};
pub use injector::{
    AsyncInjector, DefaultAsyncInjector, DefaultInjector, HopscotchAsyncInjector,
    HopscotchInjector, Injector, KeywordAsyncInjector, KeywordInjector,
};
pub use location::Location;
pub use locator::ServiceLocator;
pub use registry::ServiceRegistry;
pub use scan::{REGISTRATIONS, RegistrationEntry, scan, scan_all, scan_entries};
pub use service::{BoxedInstance, BoxedValue, Overrides, ResolvedArgs, ServiceKey};

// Re-exported so downstream registration sites (and this crate's integration
// tests) can use the distributed-slice attribute without declaring the
// dependency themselves.
pub use linkme;
