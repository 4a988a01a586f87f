//! In-memory [`Host`] keeping live objects in insertion order.

use std::any::Any;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Component, Host};

struct SceneObject {
    name: String,
    component: Arc<dyn Any + Send + Sync>,
    persistent: bool,
}

impl SceneObject {
    fn holds<T>(&self, instance: &Arc<T>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.component), Arc::as_ptr(instance))
    }
}

/// A flat list of named objects standing in for a live scene.
///
/// Objects placed with [`spawn`](SceneHost::spawn) are what the registry
/// discovers; objects it creates are appended the same way.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::{SceneHost, SingletonRegistry};
///
/// #[derive(Default)]
/// struct Mixer;
///
/// let host = SceneHost::new();
/// let placed = host.spawn("Mixer (scene)", Mixer);
///
/// let registry = SingletonRegistry::new(host);
/// let resolved = registry.get_instance::<Mixer>().unwrap();
/// assert!(std::sync::Arc::ptr_eq(&placed, &resolved));
/// ```
#[derive(Default)]
pub struct SceneHost {
    objects: Mutex<Vec<SceneObject>>,
}

impl SceneHost {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    fn objects(&self) -> MutexGuard<'_, Vec<SceneObject>> {
        self.objects.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Place a pre-existing object in the scene and return a handle to it.
    ///
    /// Objects are not persistent until a registry marks them so.
    pub fn spawn<T: Send + Sync + 'static>(&self, name: impl Into<String>, value: T) -> Arc<T> {
        let instance = Arc::new(value);
        self.spawn_arc(name, instance.clone());
        instance
    }

    /// Like [`spawn`](SceneHost::spawn), for an object the caller already shares.
    pub fn spawn_arc<T: Send + Sync + 'static>(&self, name: impl Into<String>, instance: Arc<T>) {
        self.objects().push(SceneObject {
            name: name.into(),
            component: instance,
            persistent: false,
        });
    }

    /// Number of live objects of type `T`.
    pub fn count<T: Send + Sync + 'static>(&self) -> usize {
        self.objects()
            .iter()
            .filter(|o| o.component.is::<T>())
            .count()
    }

    /// Number of live objects of any type.
    pub fn len(&self) -> usize {
        self.objects().len()
    }

    /// Whether the scene holds no objects at all.
    pub fn is_empty(&self) -> bool {
        self.objects().is_empty()
    }

    /// Whether `instance` is live and was marked persistent.
    pub fn is_persistent<T>(&self, instance: &Arc<T>) -> bool {
        self.objects()
            .iter()
            .any(|o| o.holds(instance) && o.persistent)
    }

    /// Whether `instance` is live (spawned or created, and not destroyed).
    pub fn contains<T>(&self, instance: &Arc<T>) -> bool {
        self.objects().iter().any(|o| o.holds(instance))
    }

    /// Name `instance` was spawned or created under, while it is live.
    pub fn name_of<T>(&self, instance: &Arc<T>) -> Option<String> {
        self.objects()
            .iter()
            .find(|o| o.holds(instance))
            .map(|o| o.name.clone())
    }
}

impl Host for SceneHost {
    fn find_existing<T: Component>(&self) -> Vec<Arc<T>> {
        self.objects()
            .iter()
            .filter_map(|o| o.component.clone().downcast::<T>().ok())
            .collect()
    }

    fn create<T: Component>(&self, name: &str) -> Arc<T> {
        self.spawn(name, T::default())
    }

    fn mark_persistent<T: Component>(&self, instance: &Arc<T>) {
        for object in self.objects().iter_mut().filter(|o| o.holds(instance)) {
            object.persistent = true;
        }
    }

    fn destroy<T: Component>(&self, instance: &Arc<T>) {
        self.objects().retain(|o| !o.holds(instance));
    }

    fn is_alive<T: Component>(&self, instance: &Arc<T>) -> bool {
        self.contains(instance)
    }
}
