//! Declarative registration and scanning
//!
//! The registration analog of a decorator: a factory declares itself by
//! submitting a [`RegistrationEntry`] to the [`REGISTRATIONS`] distributed
//! slice. Submission records the metadata only; nothing touches a registry
//! until a scan runs, during the single-writer phase before any container is
//! built.
//!
//! ```ignore
//! use hopwire::{Factory, REGISTRATIONS, RegistrationEntry, Result};
//!
//! fn greeter_factory() -> Result<Factory> {
//!     Ok(Factory::for_service::<Greeter>().provide(|_| Ok(Arc::new(Greeter::new()))))
//! }
//!
//! #[linkme::distributed_slice(REGISTRATIONS)]
//! static GREETER: RegistrationEntry = RegistrationEntry {
//!     module: module_path!(),
//!     build: greeter_factory,
//! };
//! ```
//!
//! [`scan`] walks the slice in link order and registers every entry whose
//! module path falls under one of the requested module prefixes; later
//! entries for the same `(service, location)` key overwrite earlier ones,
//! per registry policy. Scanning the same modules twice produces an
//! equivalent registry.

use tracing::debug;

use crate::error::{Error, Result};
use crate::factory::Factory;
use crate::registry::ServiceRegistry;

/// A declaratively submitted factory registration
///
/// `module` scopes the entry for module-filtered scans (use
/// [`module_path!`]); `build` produces the fully-formed factory, carrying
/// its own service key and location.
#[derive(Clone, Copy)]
pub struct RegistrationEntry {
    /// Module path the entry was declared in
    pub module: &'static str,
    /// Factory constructor; a failure here marks the entry malformed
    pub build: fn() -> Result<Factory>,
}

/// Distributed slice collecting every submitted registration
#[linkme::distributed_slice]
pub static REGISTRATIONS: [RegistrationEntry] = [..];

/// Whether `module` is `target` or nested below it
fn module_matches(module: &str, target: &str) -> bool {
    module == target
        || module
            .strip_prefix(target)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// Register a set of entries, in the order given
///
/// A `build` failure aborts the scan with
/// [`Error::MalformedRegistration`]; entries registered before the failure
/// remain in place.
pub fn scan_entries<'a, I>(registry: &mut ServiceRegistry, entries: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a RegistrationEntry>,
{
    let mut count = 0;
    for entry in entries {
        let factory = (entry.build)()
            .map_err(|err| Error::malformed_registration(entry.module, err.to_string()))?;
        registry.register(factory);
        count += 1;
    }
    Ok(count)
}

/// Scan the submitted registrations under the given module prefixes
///
/// Walks [`REGISTRATIONS`] in link order and registers every entry whose
/// module path equals, or is nested below, one of `modules`. Returns the
/// number of registrations performed.
pub fn scan(registry: &mut ServiceRegistry, modules: &[&str]) -> Result<usize> {
    let count = scan_entries(
        registry,
        REGISTRATIONS
            .iter()
            .filter(|entry| modules.iter().any(|m| module_matches(entry.module, m))),
    )?;
    debug!(modules = ?modules, count, "scan complete");
    Ok(count)
}

/// Scan every submitted registration, regardless of module
pub fn scan_all(registry: &mut ServiceRegistry) -> Result<usize> {
    let count = scan_entries(registry, REGISTRATIONS.iter())?;
    debug!(count, "full scan complete");
    Ok(count)
}
