//! A single lazily filled cell with a one-way teardown latch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::SingletonError;

/// Observable lifecycle of a [`SingletonSlot`].
///
/// `Empty → Active → Quitting`, with `Quitting` terminal. A purge moves
/// `Active` back to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No instance held and teardown not latched.
    Empty,
    /// An instance is held.
    Active,
    /// Teardown latched; nothing will be created again.
    Quitting,
}

struct SlotInner<T> {
    instance: Option<Arc<T>>,
    quitting: bool,
    // instances the slot removed itself (purged or rejected duplicates); their
    // destruction signals never latch teardown
    dismissed: Vec<Weak<T>>,
}

impl<T> SlotInner<T> {
    fn dismiss(&mut self, instance: &Arc<T>) {
        self.dismissed.retain(|w| w.strong_count() > 0);
        self.dismissed.push(Arc::downgrade(instance));
    }

    /// Forget `instance` if it was dismissed. Returns whether it was.
    fn forget_dismissed(&mut self, instance: &Arc<T>) -> bool {
        let before = self.dismissed.len();
        self.dismissed
            .retain(|w| w.strong_count() > 0 && !std::ptr::eq(w.as_ptr(), Arc::as_ptr(instance)));
        self.dismissed.len() != before
    }
}

/// Holds at most one `Arc<T>`.
///
/// Reads and the check-then-assign sequence happen under one mutex. The
/// `quitting` latch is mirrored in an atomic so that requests after teardown
/// skip the resolve path entirely.
///
/// # Lock Poisoning Recovery
///
/// Every method recovers a poisoned lock by extracting the inner value. Each
/// mutation leaves the cell consistent before anything that could panic runs.
pub struct SingletonSlot<T> {
    quitting: AtomicBool,
    inner: Mutex<SlotInner<T>>,
}

impl<T> Default for SingletonSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SingletonSlot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            quitting: AtomicBool::new(false),
            inner: Mutex::new(SlotInner {
                instance: None,
                quitting: false,
                dismissed: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotInner<T>> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Whether teardown has been latched. Lock-free.
    pub fn is_quitting(&self) -> bool {
        self.quitting.load(Ordering::Acquire)
    }

    /// The held instance, if any. Never resolves.
    pub fn current(&self) -> Option<Arc<T>> {
        self.lock().instance.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SlotState {
        let inner = self.lock();
        if inner.quitting {
            SlotState::Quitting
        } else if inner.instance.is_some() {
            SlotState::Active
        } else {
            SlotState::Empty
        }
    }

    /// Return the held instance, running `resolve` under the lock to fill an
    /// empty slot.
    ///
    /// After teardown `resolve` is never called: the instance held at teardown
    /// time is returned, or `UnavailableAfterTeardown` if there was none.
    ///
    /// # Errors
    ///
    /// - `UnavailableAfterTeardown` if teardown is latched and the slot is empty
    pub fn get_or_resolve<F>(&self, resolve: F) -> Result<Arc<T>, SingletonError>
    where
        F: FnOnce() -> Arc<T>,
    {
        if self.is_quitting() {
            return self.current().ok_or(Self::unavailable());
        }

        let mut inner = self.lock();
        if let Some(instance) = inner.instance.as_ref() {
            return Ok(instance.clone());
        }
        // teardown may have been latched between the fast path and the lock
        if inner.quitting {
            return Err(Self::unavailable());
        }

        let instance = resolve();
        inner.instance = Some(instance.clone());
        Ok(instance)
    }

    /// Fill an empty slot with `resolve` (unless quitting), then report whether
    /// `candidate` is the held instance.
    ///
    /// A rejected candidate is remembered as dismissed, so its own destruction
    /// signal does not latch teardown.
    pub fn claim<F>(&self, candidate: &Arc<T>, resolve: F) -> bool
    where
        F: FnOnce() -> Arc<T>,
    {
        let mut inner = self.lock();
        if inner.instance.is_none() && !inner.quitting {
            inner.instance = Some(resolve());
        }
        let kept = inner
            .instance
            .as_ref()
            .is_some_and(|held| Arc::ptr_eq(held, candidate));
        if !kept {
            inner.dismiss(candidate);
        }
        kept
    }

    /// Latch teardown. Returns `true` only for the call that latched it.
    pub fn latch_teardown(&self) -> bool {
        let mut inner = self.lock();
        if inner.quitting {
            return false;
        }
        inner.quitting = true;
        self.quitting.store(true, Ordering::Release);
        true
    }

    /// Handle the destruction signal of `instance`.
    ///
    /// Signals from instances the slot dismissed itself (purged or rejected
    /// as duplicates) are ignored, once each. Any other signal latches
    /// teardown. Returns `true` only for the call that latched it.
    pub fn signal_destroyed(&self, instance: &Arc<T>) -> bool {
        let mut inner = self.lock();
        if inner.forget_dismissed(instance) || inner.quitting {
            return false;
        }
        inner.quitting = true;
        self.quitting.store(true, Ordering::Release);
        true
    }

    /// Remove the held instance without latching teardown.
    ///
    /// The removed instance is remembered as dismissed. Returns `None` once
    /// teardown is latched or when the slot is empty.
    pub fn take(&self) -> Option<Arc<T>> {
        let mut inner = self.lock();
        if inner.quitting {
            return None;
        }
        let taken = inner.instance.take()?;
        inner.dismiss(&taken);
        Some(taken)
    }

    fn unavailable() -> SingletonError {
        SingletonError::UnavailableAfterTeardown {
            type_name: std::any::type_name::<T>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_once() {
        let slot = SingletonSlot::new();
        let mut calls = 0;

        let a = slot
            .get_or_resolve(|| {
                calls += 1;
                Arc::new(7u32)
            })
            .unwrap();
        let b = slot.get_or_resolve(|| Arc::new(8u32)).unwrap();

        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(slot.state(), SlotState::Active);
    }

    #[test]
    fn test_teardown_keeps_existing_instance() {
        let slot = SingletonSlot::new();
        let a = slot.get_or_resolve(|| Arc::new(1u8)).unwrap();

        assert!(slot.latch_teardown());
        assert!(!slot.latch_teardown());

        let after = slot.get_or_resolve(|| Arc::new(2u8)).unwrap();
        assert!(Arc::ptr_eq(&a, &after));
        assert_eq!(slot.state(), SlotState::Quitting);
    }

    #[test]
    fn test_teardown_on_empty_slot_never_resolves() {
        let slot = SingletonSlot::<u8>::new();
        assert!(slot.latch_teardown());

        let result = slot.get_or_resolve(|| panic!("resolved after teardown"));
        assert_eq!(
            result.unwrap_err(),
            SingletonError::UnavailableAfterTeardown { type_name: "u8" }
        );
    }

    #[test]
    fn test_claim_accepts_held_rejects_other() {
        let slot = SingletonSlot::new();
        let first = Arc::new(1i32);
        let second = Arc::new(1i32);

        assert!(slot.claim(&first, || first.clone()));
        assert!(!slot.claim(&second, || second.clone()));
        assert!(Arc::ptr_eq(&slot.current().unwrap(), &first));
    }

    #[test]
    fn test_claim_after_teardown_on_empty_slot() {
        let slot = SingletonSlot::new();
        slot.latch_teardown();

        let late = Arc::new(3i32);
        assert!(!slot.claim(&late, || late.clone()));
        assert!(slot.current().is_none());
    }

    #[test]
    fn test_teardown_right_after_take_latches() {
        let slot = SingletonSlot::new();
        slot.get_or_resolve(|| Arc::new(5u16)).unwrap();
        assert!(slot.take().is_some());
        assert_eq!(slot.state(), SlotState::Empty);

        assert!(slot.latch_teardown());
        assert!(slot
            .get_or_resolve(|| panic!("resolved after teardown"))
            .is_err());
    }

    #[test]
    fn test_taken_instance_signal_is_ignored_once() {
        let slot = SingletonSlot::new();
        let old = slot.get_or_resolve(|| Arc::new(5u16)).unwrap();
        slot.take().unwrap();
        let fresh = slot.get_or_resolve(|| Arc::new(6u16)).unwrap();

        // the late signal from the removed instance leaves the replacement alone
        assert!(!slot.signal_destroyed(&old));
        assert_eq!(slot.state(), SlotState::Active);
        assert!(Arc::ptr_eq(&slot.current().unwrap(), &fresh));

        assert!(slot.signal_destroyed(&fresh));
        assert_eq!(slot.state(), SlotState::Quitting);
    }

    #[test]
    fn test_rejected_candidate_signal_is_ignored() {
        let slot = SingletonSlot::new();
        let held = Arc::new(1i32);
        let duplicate = Arc::new(2i32);
        slot.claim(&held, || held.clone());
        slot.claim(&duplicate, || duplicate.clone());

        assert!(!slot.signal_destroyed(&duplicate));
        assert_eq!(slot.state(), SlotState::Active);
    }

    #[test]
    fn test_take_after_teardown_is_noop() {
        let slot = SingletonSlot::new();
        slot.get_or_resolve(|| Arc::new(5u16)).unwrap();
        slot.latch_teardown();

        assert!(slot.take().is_none());
        assert!(slot.current().is_some());
    }
}
