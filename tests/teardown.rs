//! Integration tests for the one-way teardown latch.

use lazy_singleton::{Host, SceneHost, SingletonError, SingletonRegistry, SlotState};
use std::sync::Arc;

#[derive(Default, Debug)]
struct SaveSystem;

#[test]
fn test_create_reuse_teardown_scenario() {
    let registry = SingletonRegistry::new(SceneHost::new());

    let a: Arc<SaveSystem> = registry.get_instance().unwrap();
    let again: Arc<SaveSystem> = registry.get_instance().unwrap();
    assert!(Arc::ptr_eq(&a, &again));

    assert!(registry.begin_teardown::<SaveSystem>());

    let after: Arc<SaveSystem> = registry.get_instance().unwrap();
    assert!(Arc::ptr_eq(&a, &after));
    assert_eq!(registry.host().count::<SaveSystem>(), 1);
}

#[test]
fn test_teardown_before_first_access_yields_nothing() {
    let host = SceneHost::new();
    let registry = SingletonRegistry::new(host);

    registry.begin_teardown::<SaveSystem>();

    assert!(registry.get_instance::<SaveSystem>().is_none());
    assert!(registry.get_instance::<SaveSystem>().is_none());
    assert_eq!(registry.host().count::<SaveSystem>(), 0);
}

#[test]
fn test_teardown_ignores_host_instances() {
    let host = SceneHost::new();
    host.spawn("placed", SaveSystem);
    let registry = SingletonRegistry::new(host);

    registry.begin_teardown::<SaveSystem>();

    // discovery never runs after teardown, even if an instance exists
    assert!(matches!(
        registry.try_get_instance::<SaveSystem>(),
        Err(SingletonError::UnavailableAfterTeardown { .. })
    ));
}

#[test]
fn test_teardown_latches_once() {
    let registry = SingletonRegistry::new(SceneHost::new());
    registry.get_instance::<SaveSystem>().unwrap();

    assert!(registry.begin_teardown::<SaveSystem>());
    assert!(!registry.begin_teardown::<SaveSystem>());
    assert_eq!(registry.state::<SaveSystem>().unwrap(), SlotState::Quitting);
}

#[test]
fn test_purge_is_refused_after_teardown() {
    let registry = SingletonRegistry::new(SceneHost::new());
    let a: Arc<SaveSystem> = registry.get_instance().unwrap();
    registry.begin_teardown::<SaveSystem>();

    assert!(registry.purge::<SaveSystem>().is_none());
    assert!(registry.host().contains(&a));
    assert!(Arc::ptr_eq(&a, &registry.get_instance().unwrap()));
}

#[test]
fn test_destroyed_instance_is_unavailable_after_teardown() {
    let registry = SingletonRegistry::new(SceneHost::new());
    let a: Arc<SaveSystem> = registry.get_instance().unwrap();
    registry.begin_teardown::<SaveSystem>();

    registry.host().destroy(&a);

    assert!(registry.get_instance::<SaveSystem>().is_none());
    assert!(matches!(
        registry.try_get_instance::<SaveSystem>(),
        Err(SingletonError::UnavailableAfterTeardown { .. })
    ));
    assert_eq!(registry.host().count::<SaveSystem>(), 0);
}

#[test]
fn test_on_destroy_of_held_instance_latches() {
    let registry = SingletonRegistry::new(SceneHost::new());
    let a: Arc<SaveSystem> = registry.get_instance().unwrap();

    assert!(registry.on_destroy(&a));
    assert!(!registry.on_destroy(&a));
    assert_eq!(registry.state::<SaveSystem>().unwrap(), SlotState::Quitting);
}
