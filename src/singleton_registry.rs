//! Registry of lazily created singletons, one slot per type.
//!
//! The registry is an ordinary value: construct it around a [`Host`], share it
//! (`&` or `Arc`) with whoever needs instances, and drop it when done. Each
//! type `T` gets its own [`SingletonSlot`], created the first time `T` is
//! mentioned.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{Component, Host, SingletonError, SingletonEvent, SingletonSlot, SlotState};

/// Type alias for the user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&SingletonEvent) + Send + Sync + 'static;

type SlotMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Naming and persistence policy applied when resolving instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Prepended to the type name of a created instance.
    pub name_prefix: String,
    /// Appended to the type name of a created instance.
    pub name_suffix: String,
    /// Whether discovered (not created) instances are marked persistent too.
    pub persist_discovered: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name_prefix: "[".to_string(),
            name_suffix: "]".to_string(),
            persist_discovered: true,
        }
    }
}

impl RegistryConfig {
    /// Name handed to [`Host::create`] for a created instance of `type_name`.
    pub fn instance_name(&self, type_name: &str) -> String {
        format!("{}{}{}", self.name_prefix, type_name, self.name_suffix)
    }
}

/// Hands out at most one shared instance per type.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::{SceneHost, SingletonRegistry};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct AudioHub {
///     volume: u8,
/// }
///
/// let registry = SingletonRegistry::new(SceneHost::new());
///
/// let a: Arc<AudioHub> = registry.get_instance().unwrap();
/// let b: Arc<AudioHub> = registry.get_instance().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(a.volume, 0);
///
/// registry.begin_teardown::<AudioHub>();
/// let c: Arc<AudioHub> = registry.get_instance().unwrap();
/// assert!(Arc::ptr_eq(&a, &c));
/// ```
pub struct SingletonRegistry<H: Host> {
    host: H,
    config: RegistryConfig,
    slots: Mutex<SlotMap>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl<H: Host> SingletonRegistry<H> {
    /// Create a registry over `host` with the default [`RegistryConfig`].
    pub fn new(host: H) -> Self {
        Self::with_config(host, RegistryConfig::default())
    }

    /// Create a registry over `host` with an explicit configuration.
    pub fn with_config(host: H, config: RegistryConfig) -> Self {
        Self {
            host,
            config,
            slots: Mutex::new(HashMap::new()),
            trace: Mutex::new(None),
        }
    }

    /// The host instances are discovered in and created through.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The naming and persistence policy in use.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked after the slot lock is released, so it may
    /// resolve other singletons from the same registry.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the trace lock is poisoned, this method automatically recovers.
    pub fn set_trace_callback(&self, callback: impl Fn(&SingletonEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the trace lock is poisoned, this method automatically recovers.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    fn emit_events(&self, events: &[SingletonEvent]) {
        let callback = self
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            for event in events {
                callback(event);
            }
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Slots
    // -------------------------------------------------------------------------------------------------

    fn slot<T: Component>(&self) -> Result<Arc<SingletonSlot<T>>, SingletonError> {
        let any_slot = self
            .slots
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(SingletonSlot::<T>::new()) as Arc<dyn Any + Send + Sync>)
            .clone();

        any_slot
            .downcast::<SingletonSlot<T>>()
            .map_err(|_| SingletonError::TypeMismatch {
                type_name: type_name::<T>(),
            })
    }

    /// Like `slot`, but never creates one and reports a poisoned map.
    fn existing_slot<T: Component>(&self) -> Result<Option<Arc<SingletonSlot<T>>>, SingletonError> {
        let any_slot = self
            .slots
            .lock()
            .map_err(|_| SingletonError::RegistryLock)?
            .get(&TypeId::of::<T>())
            .cloned();

        match any_slot {
            Some(any_slot) => any_slot
                .downcast::<SingletonSlot<T>>()
                .map(Some)
                .map_err(|_| SingletonError::TypeMismatch {
                    type_name: type_name::<T>(),
                }),
            None => Ok(None),
        }
    }

    /// Discover or create the instance for an empty slot. Runs under the slot lock.
    fn resolve<T: Component>(&self, events: &mut Vec<SingletonEvent>) -> Arc<T> {
        let type_name = type_name::<T>();
        let found = self.host.find_existing::<T>();
        let count = found.len();
        events.push(SingletonEvent::Discovered { type_name, count });

        let Some(first) = found.into_iter().next() else {
            let name = self.config.instance_name(type_name);
            let instance = self.host.create::<T>(&name);
            self.host.mark_persistent(&instance);
            log::debug!("created singleton {name}");
            events.push(SingletonEvent::Created { type_name });
            return instance;
        };

        if count > 1 {
            let err = SingletonError::MultipleInstances { type_name, count };
            log::error!("{err}; keeping the first discovered instance");
        }
        if self.config.persist_discovered {
            self.host.mark_persistent(&first);
        }
        first
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Retrieve the shared instance of `T`, discovering or creating it on first access.
    ///
    /// After teardown nothing is discovered or created. The instance held at
    /// teardown is returned only while [`Host::is_alive`] reports it live; once
    /// the host has destroyed it the type is unavailable.
    ///
    /// # Errors
    ///
    /// - `UnavailableAfterTeardown` if teardown began while the slot was empty,
    ///   or the held instance has since been destroyed by the host
    /// - `TypeMismatch` if the slot map is corrupted (should not happen)
    pub fn try_get_instance<T: Component>(&self) -> Result<Arc<T>, SingletonError> {
        let slot = self.slot::<T>()?;

        let mut events = Vec::new();
        let result = slot
            .get_or_resolve(|| self.resolve::<T>(&mut events))
            .and_then(|instance| {
                if slot.is_quitting() && !self.host.is_alive(&instance) {
                    Err(SingletonError::UnavailableAfterTeardown {
                        type_name: type_name::<T>(),
                    })
                } else {
                    Ok(instance)
                }
            });

        if let Err(err) = &result {
            log::debug!("{err}");
        }
        events.push(SingletonEvent::Resolved {
            type_name: type_name::<T>(),
            found: result.is_ok(),
        });
        self.emit_events(&events);

        result
    }

    /// Retrieve the shared instance of `T`.
    ///
    /// Returns `None` where [`try_get_instance`](Self::try_get_instance) would
    /// report `UnavailableAfterTeardown`: teardown began with no instance, or
    /// the instance held at teardown is no longer alive in the host.
    pub fn get_instance<T: Component>(&self) -> Option<Arc<T>> {
        self.try_get_instance().ok()
    }

    /// Register an instance that just came alive in the host.
    ///
    /// Returns `true` if `candidate` is (or became) the slot's instance. A
    /// duplicate is destroyed through the host and `false` is returned; its
    /// later [`on_destroy`](Self::on_destroy) signal is ignored.
    pub fn awake<T: Component>(&self, candidate: &Arc<T>) -> bool {
        let type_name = type_name::<T>();
        let slot = match self.slot::<T>() {
            Ok(slot) => slot,
            Err(err) => {
                log::error!("{err}");
                return false;
            }
        };

        let mut events = Vec::new();
        let kept = slot.claim(candidate, || self.resolve::<T>(&mut events));

        if !kept {
            self.host.destroy(candidate);
            log::warn!("destroyed duplicate instance of {type_name}");
            events.push(SingletonEvent::Duplicate { type_name });
        }
        self.emit_events(&events);

        kept
    }

    /// Begin teardown of `T`: no instance of `T` will be created again.
    ///
    /// Always latches. Returns `true` for the call that latched it.
    pub fn begin_teardown<T: Component>(&self) -> bool {
        self.teardown_with::<T>(|slot| slot.latch_teardown())
    }

    /// Signal that `instance` of `T` is being destroyed.
    ///
    /// Instances the registry removed itself (via [`purge`](Self::purge) or
    /// as rejected duplicates in [`awake`](Self::awake)) are ignored, once
    /// each. Any other instance's destruction begins teardown. Returns `true`
    /// for the call that latched it.
    pub fn on_destroy<T: Component>(&self, instance: &Arc<T>) -> bool {
        self.teardown_with::<T>(|slot| slot.signal_destroyed(instance))
    }

    fn teardown_with<T: Component>(&self, latch: impl FnOnce(&SingletonSlot<T>) -> bool) -> bool {
        let type_name = type_name::<T>();
        let latched = match self.slot::<T>() {
            Ok(slot) => latch(&slot),
            Err(err) => {
                log::error!("{err}");
                false
            }
        };

        if latched {
            log::debug!("teardown of {type_name}");
            self.emit_events(&[SingletonEvent::Teardown { type_name }]);
        }
        latched
    }

    /// Remove and destroy the current instance without latching teardown.
    ///
    /// The next `get_instance` discovers or creates a fresh instance. The
    /// purged instance's own [`on_destroy`](Self::on_destroy) signal is
    /// ignored; a plain [`begin_teardown`](Self::begin_teardown) still
    /// latches. Does nothing once teardown has begun.
    pub fn purge<T: Component>(&self) -> Option<Arc<T>> {
        let type_name = type_name::<T>();
        let purged = self.existing_slot::<T>().ok().flatten()?.take()?;

        self.host.destroy(&purged);
        log::debug!("purged {type_name}");
        self.emit_events(&[SingletonEvent::Purged { type_name }]);

        Some(purged)
    }

    /// Lifecycle state of the slot for `T`. Types never mentioned are `Empty`.
    ///
    /// # Errors
    ///
    /// - Registry lock is poisoned
    /// - Type mismatch (should not happen)
    pub fn state<T: Component>(&self) -> Result<SlotState, SingletonError> {
        Ok(self
            .existing_slot::<T>()?
            .map_or(SlotState::Empty, |slot| slot.state()))
    }

    /// Check whether the slot for `T` currently holds an instance.
    ///
    /// Never resolves anything.
    ///
    /// # Errors
    ///
    /// - Registry lock is poisoned
    /// - Type mismatch (should not happen)
    pub fn contains<T: Component>(&self) -> Result<bool, SingletonError> {
        Ok(self
            .existing_slot::<T>()?
            .is_some_and(|slot| slot.current().is_some()))
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
