//! Integration tests for what the registry reports through the `log` facade.
//!
//! NOTE: All tests use #[serial] because they share one process-wide capturing
//! logger. Running them in parallel would mix their records.

use lazy_singleton::{SceneHost, SingletonRegistry};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serial_test::serial;
use std::sync::{Arc, Mutex, Once};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn captured() -> Vec<(Level, String)> {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    std::mem::take(&mut *LOGGER.records.lock().unwrap())
}

#[derive(Default)]
struct Lighting;

#[test]
#[serial]
fn test_multiple_instances_logs_configuration_error() {
    captured();

    let host = SceneHost::new();
    let first = host.spawn("Lighting A", Lighting);
    host.spawn("Lighting B", Lighting);
    let registry = SingletonRegistry::new(host);

    let resolved = registry.get_instance::<Lighting>().unwrap();
    assert!(Arc::ptr_eq(&first, &resolved));

    let errors: Vec<_> = captured()
        .into_iter()
        .filter(|(level, _)| *level == Level::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].1.contains("found 2 instances"));
    assert!(errors[0].1.contains("keeping the first discovered instance"));
}

#[test]
#[serial]
fn test_single_instance_logs_no_error() {
    captured();

    let host = SceneHost::new();
    host.spawn("Lighting", Lighting);
    let registry = SingletonRegistry::new(host);
    registry.get_instance::<Lighting>().unwrap();

    assert!(captured().iter().all(|(level, _)| *level != Level::Error));
}

#[test]
#[serial]
fn test_duplicate_destruction_logs_warning() {
    captured();

    let registry = SingletonRegistry::new(SceneHost::new());
    registry.get_instance::<Lighting>().unwrap();
    let duplicate = registry.host().spawn("copy", Lighting);
    registry.awake(&duplicate);

    let warnings: Vec<_> = captured()
        .into_iter()
        .filter(|(level, _)| *level == Level::Warn)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].1.contains("destroyed duplicate instance"));
}
