//! Concurrent resolution tests
//!
//! The container is shared across true OS threads. Same-key races may
//! duplicate factory computation (factories are side-effect-free by
//! contract) but must never corrupt the cache or hand out a partially
//! constructed instance.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use hopwire::{Container, Factory, Param, ServiceRegistry};

struct Token {
    checksum: u64,
}

const CHECKSUM: u64 = 0xDEC0_DE;

#[test]
fn concurrent_first_resolutions_are_all_valid() {
    const THREADS: usize = 16;

    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ServiceRegistry::new();
    let counter = Arc::clone(&calls);
    registry.register(Factory::for_service::<Token>().provide(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        // Widen the race window so several threads compute simultaneously.
        thread::sleep(Duration::from_millis(5));
        Ok(Arc::new(Token { checksum: CHECKSUM }))
    }));
    let container = Container::builder(registry.into_shared()).build();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    let token: Arc<Token> = container.get().unwrap();
                    assert_eq!(token.checksum, CHECKSUM);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    });

    // The factory may run once per racing thread, never more, and the cache
    // converges on a single entry.
    let invocations = calls.load(Ordering::SeqCst);
    assert!((1..=THREADS).contains(&invocations));
    assert_eq!(container.cached(), 1);

    // After the race settles, everyone observes one shared instance.
    let a: Arc<Token> = container.get().unwrap();
    let b: Arc<Token> = container.get().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(calls.load(Ordering::SeqCst), invocations);
}

#[test]
fn different_keys_resolve_independently() {
    struct Left;
    struct Right {
        _left: Arc<Left>,
    }

    let mut registry = ServiceRegistry::new();
    registry.register(Factory::for_service::<Left>().provide(|_| Ok(Arc::new(Left))));
    registry.register(
        Factory::for_service::<Right>()
            .param(Param::injected::<Left>("left"))
            .provide(|args| {
                Ok(Arc::new(Right {
                    _left: args.service("left")?,
                }))
            }),
    );
    let container = Container::builder(registry.into_shared()).build();
    let container = &container;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                scope.spawn(move || {
                    if i % 2 == 0 {
                        container.get::<Left>().map(|_| ())
                    } else {
                        container.get::<Right>().map(|_| ())
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
    });

    assert_eq!(container.cached(), 2);
}
