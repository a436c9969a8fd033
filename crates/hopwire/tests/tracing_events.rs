//! Tracing event tests
//!
//! The library emits structured events and leaves subscriber installation to
//! the embedder. These tests install a capturing subscriber and assert the
//! registration and cache lifecycle events actually fire.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use hopwire::{Container, Factory, ServiceRegistry};
use tracing::Level;
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;

struct Beacon;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn captured<F: FnOnce()>(max_level: Level, scope: F) -> String {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(capture.clone())
        .without_time()
        .with_ansi(false)
        .finish();
    with_default(subscriber, scope);
    let bytes = capture.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn registration_and_overwrite_are_logged() {
    let output = captured(Level::DEBUG, || {
        let mut registry = ServiceRegistry::new();
        registry.register(Factory::for_service::<Beacon>().provide(|_| Ok(Arc::new(Beacon))));
        registry.register(Factory::for_service::<Beacon>().provide(|_| Ok(Arc::new(Beacon))));
    });

    assert!(output.contains("registered binding"), "output: {output}");
    assert!(output.contains("replaced existing binding"), "output: {output}");
}

#[test]
fn cache_stores_and_hits_are_traced() {
    let output = captured(Level::TRACE, || {
        let mut registry = ServiceRegistry::new();
        registry.register(Factory::for_service::<Beacon>().provide(|_| Ok(Arc::new(Beacon))));
        let container = Container::builder(registry.into_shared()).build();
        let _: Arc<Beacon> = container.get().unwrap();
        let _: Arc<Beacon> = container.get().unwrap();
    });

    assert!(output.contains("cache store"), "output: {output}");
    assert!(output.contains("cache hit"), "output: {output}");
}
