//! Location fallback tests
//!
//! Prefix-correctness grid from the resolution contract: registrations at
//! `""`, `"a"`, and `"a/b"`, requests across the hierarchy, and the
//! hopscotch injector resolving dependencies at the request location.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hopwire::{
    Container, Error, Factory, HopscotchInjector, Location, Overrides, Param, ServiceRegistry,
};

struct Banner {
    text: &'static str,
}

fn loc(path: &str) -> Location {
    Location::parse(path).unwrap()
}

fn banner_registry() -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    for (path, text) in [("", "global"), ("a", "section-a"), ("a/b", "page-ab")] {
        registry.register(
            Factory::for_service::<Banner>()
                .at(loc(path))
                .provide(move |_| Ok(Arc::new(Banner { text }))),
        );
    }
    registry
}

#[test]
fn lookup_prefers_longest_matching_prefix() {
    let container = Container::builder(banner_registry().into_shared()).build();

    let banner: Arc<Banner> = container.get_at(&loc("a/b/c")).unwrap();
    assert_eq!(banner.text, "page-ab");

    let banner: Arc<Banner> = container.get_at(&loc("a")).unwrap();
    assert_eq!(banner.text, "section-a");

    let banner: Arc<Banner> = container.get_at(&loc("x")).unwrap();
    assert_eq!(banner.text, "global");
}

#[test]
fn lookup_without_global_fallback_fails() {
    let mut registry = ServiceRegistry::new();
    registry.register(
        Factory::for_service::<Banner>()
            .at(loc("a"))
            .provide(|_| Ok(Arc::new(Banner { text: "a" }))),
    );
    let container = Container::builder(registry.into_shared()).build();

    let result = container.get_at::<Banner>(&loc("x"));
    assert!(matches!(result, Err(Error::LocationUnresolved { .. })));
}

#[test]
fn repeated_lookups_are_deterministic() {
    let container = Container::builder(banner_registry().into_shared()).build();
    let first: Arc<Banner> = container.get_at(&loc("a/b/c")).unwrap();
    for _ in 0..5 {
        let again: Arc<Banner> = container.get_at(&loc("a/b/c")).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }
}

#[test]
fn sibling_requests_share_the_matched_binding_instance() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ServiceRegistry::new();
    let counter = Arc::clone(&calls);
    registry.register(
        Factory::for_service::<Banner>()
            .at(loc("a/b"))
            .provide(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(Banner { text: "shared" }))
            }),
    );
    let container = Container::builder(registry.into_shared()).build();

    // Both requests fall back to the binding registered at "a/b", so the
    // cache key is the matched location and the instance is shared.
    let left: Arc<Banner> = container.get_at(&loc("a/b/c")).unwrap();
    let right: Arc<Banner> = container.get_at(&loc("a/b/d")).unwrap();
    assert!(Arc::ptr_eq(&left, &right));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn distinct_bindings_produce_distinct_instances() {
    let container = Container::builder(banner_registry().into_shared()).build();
    let global: Arc<Banner> = container.get().unwrap();
    let scoped: Arc<Banner> = container.get_at(&loc("a")).unwrap();
    assert!(!Arc::ptr_eq(&global, &scoped));
}

#[test]
fn hopscotch_injector_resolves_dependencies_at_request_location() {
    struct Page {
        banner: Arc<Banner>,
    }

    let mut registry = banner_registry();
    registry.register(
        Factory::for_service::<Page>()
            .param(Param::injected::<Banner>("banner"))
            .provide(|args| {
                Ok(Arc::new(Page {
                    banner: args.service("banner")?,
                }))
            }),
    );
    let container = Container::builder(registry.into_shared())
        .injector(Arc::new(HopscotchInjector))
        .build();

    let page: Arc<Page> = container.get_at(&loc("a/b/c")).unwrap();
    assert_eq!(page.banner.text, "page-ab");

    let fresh = Container::builder(Arc::clone(container.registry()))
        .injector(Arc::new(HopscotchInjector))
        .build();
    let page: Arc<Page> = fresh.get_at(&loc("x/y")).unwrap();
    assert_eq!(page.banner.text, "global");
}

#[test]
fn hopscotch_injector_honors_override_precedence() {
    struct Page {
        banner: Arc<Banner>,
    }

    let mut registry = banner_registry();
    registry.register(
        Factory::for_service::<Page>()
            .param(Param::injected::<Banner>("banner"))
            .provide(|args| {
                Ok(Arc::new(Page {
                    banner: args.service("banner")?,
                }))
            }),
    );
    let container = Container::builder(registry.into_shared())
        .injector(Arc::new(HopscotchInjector))
        .build();

    let custom = Arc::new(Banner { text: "custom" });
    let page: Arc<Page> = container
        .get_at_with(
            &loc("a/b/c"),
            Overrides::new().with("banner", Arc::clone(&custom)),
        )
        .unwrap();
    assert!(Arc::ptr_eq(&page.banner, &custom));
}
