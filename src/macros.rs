//! Macros that capture the call site for [`CapLog`](crate::CapLog).

/// Full path of the enclosing function, e.g. `my_game::player::update`.
///
/// Inside a closure the closure's enclosing function is reported.
///
/// ```rust
/// fn spawn_wave() -> &'static str {
///     lazy_singleton::function_name!()
/// }
///
/// assert!(spawn_wave().ends_with("::spawn_wave"));
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        $crate::__enclosing_function(::std::any::type_name_of_val(&f))
    }};
}

/// Build a [`CallSite`](crate::CallSite) for the current location.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(
            file!(),
            line!(),
            $crate::function_name!(),
            module_path!(),
        )
    };
}

/// Log a plain LOGG entry.
///
/// # Example
///
/// ```rust
/// use lazy_singleton::{cap_log, CapLog};
///
/// let logger = CapLog::default();
/// cap_log!(logger, "frame {} done", 12);
/// ```
#[macro_export]
macro_rules! cap_log {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::LogKind::Log, &format!($($arg)*), $crate::call_site!())
    };
}

/// Log an INFO entry.
#[macro_export]
macro_rules! cap_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::LogKind::Info, &format!($($arg)*), $crate::call_site!())
    };
}

/// Log a GOOD entry.
#[macro_export]
macro_rules! cap_success {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::LogKind::Success, &format!($($arg)*), $crate::call_site!())
    };
}

/// Log a WARN entry.
#[macro_export]
macro_rules! cap_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::LogKind::Warning, &format!($($arg)*), $crate::call_site!())
    };
}

/// Log an ERRR entry.
#[macro_export]
macro_rules! cap_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::LogKind::Error, &format!($($arg)*), $crate::call_site!())
    };
}

/// Log GOOD if the condition holds, ERRR otherwise.
///
/// # Example
///
/// ```rust
/// use lazy_singleton::{cap_assert, CapLog};
///
/// let logger = CapLog::default();
/// let hp = 10;
/// cap_assert!(logger, hp > 0, "player alive with {} hp", hp);
/// ```
#[macro_export]
macro_rules! cap_assert {
    ($logger:expr, $cond:expr, $($arg:tt)*) => {
        $logger.log_assert($cond, &format!($($arg)*), $crate::call_site!())
    };
}
