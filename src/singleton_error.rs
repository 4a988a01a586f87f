//! Error type for registry operations.

use thiserror::Error;

/// Errors produced while resolving singletons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SingletonError {
    /// More than one live instance of the type was discovered in the host.
    ///
    /// Only reported through logging and tracing; the registry recovers by
    /// keeping the first discovered instance.
    #[error("found {count} instances of {type_name}, expected at most one")]
    MultipleInstances {
        type_name: &'static str,
        count: usize,
    },

    /// Teardown of the type began with no live instance to hand out.
    #[error("{type_name} was requested after teardown began")]
    UnavailableAfterTeardown { type_name: &'static str },

    /// The slot stored for a type could not be downcast (should not happen).
    #[error("Type mismatch in registry for {type_name}")]
    TypeMismatch { type_name: &'static str },

    /// The slot map lock could not be acquired.
    #[error("Failed to acquire registry lock")]
    RegistryLock,
}
