//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the hopwire resolution engine
///
/// Every resolution failure surfaces as a typed error at the failing
/// `get`/`resolve` call. There is no internal retry and no sentinel values:
/// resolution is deterministic, so retrying would reproduce the same failure.
#[derive(Error, Debug)]
pub enum Error {
    /// A required parameter or service could not be resolved from the
    /// registry, an override, or a default
    #[error("missing dependency: {message}")]
    MissingDependency {
        /// Description of what could not be resolved
        message: String,
    },

    /// Keyword overrides were supplied to a container with no injector bound
    #[error("injector not configured: overrides were supplied but the container has no injector bound")]
    InjectorNotConfigured,

    /// Keyword overrides were supplied alongside a multi-service batch request
    #[error(
        "ambiguous override: keyword overrides cannot target a batch request (services: {services}, overrides: {overrides})"
    )]
    AmbiguousOverride {
        /// Number of services in the batch request
        services: usize,
        /// Number of overrides supplied
        overrides: usize,
    },

    /// No prefix of the requested location (including global) has a matching
    /// registration for the requested service
    #[error("location unresolved: no binding for `{service}` at `{location}` or any parent location")]
    LocationUnresolved {
        /// The requested service type name
        service: String,
        /// The requested location path
        location: String,
    },

    /// A synchronous resolution reached a factory with an async construct
    #[error("factory for `{service}` is asynchronous; resolve it with `aget`")]
    AsyncFactory {
        /// The service whose factory is async-only
        service: String,
    },

    /// Overrides were handed to an injector strategy that declares no
    /// override handling
    #[error("injector `{injector}` does not accept keyword overrides")]
    OverridesNotSupported {
        /// Name of the rejecting injector strategy
        injector: &'static str,
    },

    /// An override name does not appear in the factory's declared parameter set
    #[error("unknown override `{name}`: factory for `{service}` declares no such parameter")]
    UnknownOverride {
        /// The service whose factory rejected the override
        service: String,
        /// The unrecognized override name
        name: String,
    },

    /// A resolved instance could not be downcast to the requested type
    #[error("type mismatch resolving `{service}`: stored instance is not a `{expected}`")]
    TypeMismatch {
        /// The service that was resolved
        service: String,
        /// The type the caller asked for
        expected: &'static str,
    },

    /// A declaratively submitted factory failed to build during scanning
    #[error("malformed registration in `{module}`: {detail}")]
    MalformedRegistration {
        /// Module path of the offending registration entry
        module: String,
        /// Description of the failure
        detail: String,
    },

    /// A location literal contained an empty segment
    #[error("invalid location `{path}`: segments must be non-empty")]
    InvalidLocation {
        /// The rejected path literal
        path: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a missing-dependency error for an unregistered service
    pub fn missing_service<S: Into<String>>(service: S) -> Self {
        Self::MissingDependency {
            message: format!("no factory registered for `{}`", service.into()),
        }
    }

    /// Create a missing-dependency error for an unresolvable parameter
    pub fn missing_param<S: Into<String>>(service: S, param: &str) -> Self {
        Self::MissingDependency {
            message: format!(
                "parameter `{param}` of `{}` has no override, registration, or default",
                service.into()
            ),
        }
    }

    /// Create a location-unresolved error
    pub fn location_unresolved<S: Into<String>, L: Into<String>>(service: S, location: L) -> Self {
        Self::LocationUnresolved {
            service: service.into(),
            location: location.into(),
        }
    }

    /// Create an ambiguous-override error for a batch request
    pub fn ambiguous_override(services: usize, overrides: usize) -> Self {
        Self::AmbiguousOverride {
            services,
            overrides,
        }
    }

    /// Create an async-factory error
    pub fn async_factory<S: Into<String>>(service: S) -> Self {
        Self::AsyncFactory {
            service: service.into(),
        }
    }
}

// Override validation error creation methods
impl Error {
    /// Create an unknown-override error
    pub fn unknown_override<S: Into<String>, N: Into<String>>(service: S, name: N) -> Self {
        Self::UnknownOverride {
            service: service.into(),
            name: name.into(),
        }
    }

    /// Create an overrides-not-supported error
    pub fn overrides_not_supported(injector: &'static str) -> Self {
        Self::OverridesNotSupported { injector }
    }
}

// Registration and typing error creation methods
impl Error {
    /// Create a type-mismatch error
    pub fn type_mismatch<S: Into<String>>(service: S, expected: &'static str) -> Self {
        Self::TypeMismatch {
            service: service.into(),
            expected,
        }
    }

    /// Create a malformed-registration error
    pub fn malformed_registration<M: Into<String>, D: Into<String>>(module: M, detail: D) -> Self {
        Self::MalformedRegistration {
            module: module.into(),
            detail: detail.into(),
        }
    }

    /// Create an invalid-location error
    pub fn invalid_location<P: Into<String>>(path: P) -> Self {
        Self::InvalidLocation { path: path.into() }
    }
}
