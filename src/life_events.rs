//! Damage and death notifications for actors (players, enemies, NPCs).

use std::sync::{Arc, Mutex};

type Callback = Arc<dyn Fn() + Send + Sync>;

/// Subscriber lists for an actor's damage and death.
///
/// Callbacks run in subscription order, outside the subscriber lock, so a
/// callback may subscribe further callbacks.
///
/// # Lock Poisoning Recovery
///
/// A poisoned subscriber list is recovered by extracting the inner value.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::LifeEvents;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
///
/// let hits = Arc::new(AtomicU32::new(0));
/// let events = LifeEvents::new();
///
/// let counter = hits.clone();
/// events.on_damage_taken(move || {
///     counter.fetch_add(1, Ordering::Relaxed);
/// });
///
/// events.take_damage();
/// events.take_damage();
/// assert_eq!(hits.load(Ordering::Relaxed), 2);
/// ```
#[derive(Default)]
pub struct LifeEvents {
    damage_taken: Mutex<Vec<Callback>>,
    death: Mutex<Vec<Callback>>,
}

impl LifeEvents {
    /// Empty subscriber lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` on every [`take_damage`](Self::take_damage).
    pub fn on_damage_taken(&self, callback: impl Fn() + Send + Sync + 'static) {
        Self::subscribe(&self.damage_taken, callback);
    }

    /// Run `callback` on every [`die`](Self::die).
    pub fn on_death(&self, callback: impl Fn() + Send + Sync + 'static) {
        Self::subscribe(&self.death, callback);
    }

    /// Notify damage subscribers.
    pub fn take_damage(&self) {
        Self::notify(&self.damage_taken);
    }

    /// Notify death subscribers.
    pub fn die(&self) {
        Self::notify(&self.death);
    }

    fn subscribe(list: &Mutex<Vec<Callback>>, callback: impl Fn() + Send + Sync + 'static) {
        list.lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(Arc::new(callback));
    }

    fn notify(list: &Mutex<Vec<Callback>>) {
        let callbacks = list.lock().unwrap_or_else(|p| p.into_inner()).clone();
        for callback in callbacks {
            callback();
        }
    }
}
