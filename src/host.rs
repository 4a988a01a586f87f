//! The object-lifecycle environment a registry resolves instances from.
//!
//! A host owns the live objects of a running application (a scene, a service
//! container, a plugin table). The registry never scans anything itself: it asks
//! the host for pre-existing instances, asks it to create one when none exist,
//! and tells it which instances must outlive ordinary unloading.

use std::sync::Arc;

/// A type that can live in a singleton slot.
///
/// `Default` is the constructor a host uses when the registry has to create the
/// instance on demand. Every `Default + Send + Sync + 'static` type qualifies.
pub trait Component: Default + Send + Sync + 'static {}

impl<T: Default + Send + Sync + 'static> Component for T {}

/// Object-lifecycle operations consumed by [`SingletonRegistry`](crate::SingletonRegistry).
///
/// # Reentrancy
///
/// `find_existing` and `create` are called while the slot for `T` is locked.
/// They must NOT call back into the registry for the same `T`, as this will
/// deadlock. Resolving other types is fine.
pub trait Host: Send + Sync {
    /// All live instances of `T`, in discovery order.
    fn find_existing<T: Component>(&self) -> Vec<Arc<T>>;

    /// Create and register a new instance of `T` under `name`.
    fn create<T: Component>(&self, name: &str) -> Arc<T>;

    /// Keep `instance` alive across unloads of its surroundings.
    fn mark_persistent<T: Component>(&self, instance: &Arc<T>);

    /// Remove `instance` from the host.
    fn destroy<T: Component>(&self, instance: &Arc<T>);

    /// Whether `instance` is still live in the host.
    ///
    /// Consulted after teardown, when the registry no longer replaces a
    /// missing instance. Hosts that cannot tell report every instance as live.
    fn is_alive<T: Component>(&self, _instance: &Arc<T>) -> bool {
        true
    }
}

impl<H: Host> Host for Arc<H> {
    fn find_existing<T: Component>(&self) -> Vec<Arc<T>> {
        (**self).find_existing()
    }

    fn create<T: Component>(&self, name: &str) -> Arc<T> {
        (**self).create(name)
    }

    fn mark_persistent<T: Component>(&self, instance: &Arc<T>) {
        (**self).mark_persistent(instance)
    }

    fn destroy<T: Component>(&self, instance: &Arc<T>) {
        (**self).destroy(instance)
    }

    fn is_alive<T: Component>(&self, instance: &Arc<T>) -> bool {
        (**self).is_alive(instance)
    }
}
