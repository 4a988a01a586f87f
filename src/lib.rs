//! # Lazy Singleton
//!
//! Thread-safe, lazily created singletons resolved from an injectable host.
//!
//! A [`SingletonRegistry`] hands out at most one shared `Arc<T>` per type. On
//! first access it asks its [`Host`] for pre-existing instances and creates one
//! only when none exist. Once teardown of a type begins, no new instance of
//! that type is ever created.
//!
//! ## Quick Start
//!
//! ```rust
//! use lazy_singleton::{SceneHost, SingletonRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Inventory {
//!     slots: usize,
//! }
//!
//! let registry = SingletonRegistry::new(SceneHost::new());
//!
//! let inventory: Arc<Inventory> = registry.get_instance().unwrap();
//! assert_eq!(inventory.slots, 0);
//!
//! registry.begin_teardown::<Inventory>();
//! assert!(registry.get_instance::<Inventory>().is_some());
//! ```
//!
//! ## Features
//!
//! - **Double-checked locking**: one mutex per type guards check and create
//! - **Injectable discovery**: the [`Host`] trait, with [`SceneHost`] in memory
//! - **One-way teardown**: a latched type never resurrects
//! - **Tracing support**: optional callback receiving [`SingletonEvent`]s
//! - **CapLog**: colored logging annotated with file, caller and line
//!
//! Registry diagnostics go through the `log` facade; install any logger
//! (e.g. `env_logger`) to see them.

mod cap_log;
mod host;
mod interactable;
mod life_events;
mod log_colors;
mod macros;
mod scene_host;
mod singleton_error;
mod singleton_event;
mod singleton_registry;
mod singleton_slot;

pub use cap_log::{
    CallSite, CapLog, CapLogConfig, ConsoleSink, LogEntry, LogKind, LogSink, Markup, MemorySink,
};
#[doc(hidden)]
pub use cap_log::__enclosing_function;
pub use host::{Component, Host};
pub use interactable::{Interactable, Interaction};
pub use life_events::LifeEvents;
pub use log_colors::LogColors;
pub use scene_host::SceneHost;
pub use singleton_error::SingletonError;
pub use singleton_event::SingletonEvent;
pub use singleton_registry::{RegistryConfig, SingletonRegistry, TraceCallback};
pub use singleton_slot::{SingletonSlot, SlotState};
