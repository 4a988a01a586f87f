/// Events emitted by the registry while resolving and tearing down singletons.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::SingletonEvent;
///
/// let event = SingletonEvent::Created { type_name: "i32" };
/// assert_eq!(event.to_string(), "created { type_name: i32 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingletonEvent {
    /// The host was searched for pre-existing instances.
    Discovered {
        /// The type name that was searched for
        type_name: &'static str,
        /// How many live instances the host reported
        count: usize,
    },

    /// No instance existed, so a new one was created and persisted.
    Created {
        /// The type name of the created instance
        type_name: &'static str,
    },

    /// An instance was requested.
    Resolved {
        type_name: &'static str,
        /// Whether an instance was handed back to the caller
        found: bool,
    },

    /// A second instance woke up and was destroyed in favour of the slot's instance.
    Duplicate { type_name: &'static str },

    /// The active instance was removed without latching teardown.
    Purged { type_name: &'static str },

    /// Teardown was latched; no instance will be created again.
    Teardown { type_name: &'static str },
}

impl std::fmt::Display for SingletonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SingletonEvent::Discovered { type_name, count } => {
                write!(f, "discovered {{ type_name: {}, count: {} }}", type_name, count)
            }
            SingletonEvent::Created { type_name } => {
                write!(f, "created {{ type_name: {} }}", type_name)
            }
            SingletonEvent::Resolved { type_name, found } => {
                write!(f, "resolved {{ type_name: {}, found: {} }}", type_name, found)
            }
            SingletonEvent::Duplicate { type_name } => {
                write!(f, "duplicate {{ type_name: {} }}", type_name)
            }
            SingletonEvent::Purged { type_name } => {
                write!(f, "purged {{ type_name: {} }}", type_name)
            }
            SingletonEvent::Teardown { type_name } => {
                write!(f, "teardown {{ type_name: {} }}", type_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_event_display() {
        let event = SingletonEvent::Discovered {
            type_name: "i32",
            count: 2,
        };
        assert_eq!(event.to_string(), "discovered { type_name: i32, count: 2 }");

        let event = SingletonEvent::Resolved {
            type_name: "String",
            found: false,
        };
        assert_eq!(event.to_string(), "resolved { type_name: String, found: false }");

        let event = SingletonEvent::Teardown { type_name: "u8" };
        assert_eq!(event.to_string(), "teardown { type_name: u8 }");

        let event = SingletonEvent::Duplicate { type_name: "u8" };
        assert_eq!(event.to_string(), "duplicate { type_name: u8 }");

        let event = SingletonEvent::Purged { type_name: "u8" };
        assert_eq!(event.to_string(), "purged { type_name: u8 }");
    }

    #[test]
    fn test_singleton_event_clone() {
        let event = SingletonEvent::Created { type_name: "i32" };
        let cloned = event.clone();
        assert_eq!(event, cloned);
    }
}
