//! Colored console logging annotated with the call site.
//!
//! Every entry is laid out as `[file.rs @ caller():line] TAG - message`, where
//! the site and tag are colored by kind. Entries go to a [`LogSink`] and are
//! also forwarded to the `log` facade under the `cap_log` target.
//!
//! The `cap_*!` macros fill in the call site:
//!
//! ```rust
//! use lazy_singleton::{cap_info, CapLog, CapLogConfig, Markup, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::default());
//! let config = CapLogConfig { markup: Markup::Plain, ..CapLogConfig::default() };
//! let logger = CapLog::with_sink(config, sink.clone());
//!
//! cap_info!(logger, "loaded {} levels", 3);
//! assert!(sink.rendered()[0].ends_with("INFO - loaded 3 levels"));
//! ```

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use colored::Colorize;

use crate::LogColors;

/// Kind of a log entry. Each kind has a four-letter tag and a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// General trace output, `LOGG`.
    Log,
    /// `INFO`.
    Info,
    /// A completed step, `GOOD`.
    Success,
    /// `WARN`.
    Warning,
    /// `ERRR`.
    Error,
}

impl LogKind {
    /// Four-letter tag printed after the call site.
    pub fn tag(self) -> &'static str {
        match self {
            LogKind::Log => "LOGG",
            LogKind::Info => "INFO",
            LogKind::Success => "GOOD",
            LogKind::Warning => "WARN",
            LogKind::Error => "ERRR",
        }
    }

    /// `#RRGGBB` color of the call site and tag.
    pub fn color(self) -> &'static str {
        match self {
            LogKind::Log => LogColors::LOG,
            LogKind::Info => LogColors::INFO,
            LogKind::Success => LogColors::SUCCESS,
            LogKind::Warning => LogColors::WARNING,
            LogKind::Error => LogColors::ERROR,
        }
    }

    /// Level used when forwarding to the `log` facade.
    pub fn level(self) -> log::Level {
        match self {
            LogKind::Log => log::Level::Debug,
            LogKind::Info | LogKind::Success => log::Level::Info,
            LogKind::Warning => log::Level::Warn,
            LogKind::Error => log::Level::Error,
        }
    }
}

/// Where a log call was made. Usually built by [`call_site!`](crate::call_site).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Source file as given by `file!()`.
    pub file: &'static str,
    pub line: u32,
    /// Full path of the calling function, e.g. `game::player::update`.
    pub caller: &'static str,
    /// Module path of the caller.
    pub module: &'static str,
}

impl CallSite {
    /// Build a call site by hand. Prefer [`call_site!`](crate::call_site).
    pub const fn new(
        file: &'static str,
        line: u32,
        caller: &'static str,
        module: &'static str,
    ) -> Self {
        Self {
            file,
            line,
            caller,
            module,
        }
    }

    /// Last component of `file`.
    pub fn file_name(&self) -> &'static str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }

    /// Last path segment of `caller`: the bare function name.
    pub fn function_name(&self) -> &'static str {
        self.caller.rsplit("::").next().unwrap_or(self.caller)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} @ {}():{}]",
            self.file_name(),
            self.function_name(),
            self.line
        )
    }
}

/// Turn the type name of a marker fn nested in some function into that
/// function's path. Closure segments are dropped so a call inside a closure
/// reports the enclosing function.
#[doc(hidden)]
pub fn __enclosing_function(marker_path: &'static str) -> &'static str {
    let mut path = marker_path.strip_suffix("::f").unwrap_or(marker_path);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path
}

/// How colors are expressed in a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Markup {
    /// `<color=#hex><b>..</b></color>` tags, for consoles that read rich text.
    RichText,
    /// 24-bit ANSI escape codes.
    #[default]
    Ansi,
    /// No markup at all.
    Plain,
}

/// One logged line, as handed to a [`LogSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub site: CallSite,
    /// The message without site or tag.
    pub message: String,
    /// The fully formatted line, markup included.
    pub rendered: String,
}

/// Destination for rendered entries.
pub trait LogSink: Send + Sync {
    /// Emit one entry. Called only for enabled loggers.
    fn write(&self, entry: &LogEntry);
}

/// Prints entries to stdout, warnings and errors to stderr.
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, entry: &LogEntry) {
        match entry.kind {
            LogKind::Warning | LogKind::Error => eprintln!("{}", entry.rendered),
            _ => println!("{}", entry.rendered),
        }
    }
}

/// Keeps entries in memory.
///
/// # Lock Poisoning Recovery
///
/// A poisoned entry list is recovered by extracting the inner value.
#[derive(Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    /// Snapshot of every entry written so far, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// The rendered lines of [`entries`](Self::entries).
    pub fn rendered(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.rendered).collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(entry.clone());
    }
}

/// Settings for a [`CapLog`]. Enabled with ANSI markup by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapLogConfig {
    /// Initial on/off switch; see [`CapLog::set_enabled`].
    pub enabled: bool,
    pub markup: Markup,
}

impl Default for CapLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            markup: Markup::default(),
        }
    }
}

/// The colored call-site logger.
///
/// `CapLog` is `Default` (console sink, ANSI markup), so it can be resolved
/// from a [`SingletonRegistry`](crate::SingletonRegistry) like any other
/// component.
pub struct CapLog {
    enabled: AtomicBool,
    markup: Markup,
    sink: Arc<dyn LogSink>,
}

impl Default for CapLog {
    fn default() -> Self {
        Self::new(CapLogConfig::default())
    }
}

impl CapLog {
    /// Create a logger writing to the [`ConsoleSink`].
    pub fn new(config: CapLogConfig) -> Self {
        Self::with_sink(config, Arc::new(ConsoleSink))
    }

    /// Create a logger writing to `sink`.
    pub fn with_sink(config: CapLogConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            enabled: AtomicBool::new(config.enabled),
            markup: config.markup,
            sink,
        }
    }

    /// Whether entries are currently written.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Switch output on or off. Disabled loggers skip sink and `log` facade alike.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Format one line in this logger's markup, without writing it.
    pub fn render(&self, kind: LogKind, message: &str, site: &CallSite) -> String {
        match self.markup {
            Markup::RichText => format!(
                "<color={}><b>{}</b> {} </color> - {}",
                kind.color(),
                site,
                kind.tag(),
                message
            ),
            Markup::Ansi => {
                let (r, g, b) = LogColors::rgb(kind.color()).unwrap_or((255, 255, 255));
                format!(
                    "{} {} - {}",
                    site.to_string().as_str().truecolor(r, g, b).bold(),
                    kind.tag().truecolor(r, g, b),
                    message
                )
            }
            Markup::Plain => format!("{} {} - {}", site, kind.tag(), message),
        }
    }

    /// Write an entry of `kind`. Also forwarded to the `log` facade under the
    /// `cap_log` target, uncolored.
    pub fn log(&self, kind: LogKind, message: &str, site: CallSite) {
        if !self.is_enabled() {
            return;
        }

        log::log!(target: "cap_log", kind.level(), "{} {} - {}", site, kind.tag(), message);

        let entry = LogEntry {
            kind,
            site,
            message: message.to_string(),
            rendered: self.render(kind, message, &site),
        };
        self.sink.write(&entry);
    }

    /// Write an `INFO` entry.
    pub fn info(&self, message: &str, site: CallSite) {
        self.log(LogKind::Info, message, site);
    }

    /// Write a `GOOD` entry.
    pub fn success(&self, message: &str, site: CallSite) {
        self.log(LogKind::Success, message, site);
    }

    /// Write a `WARN` entry.
    pub fn warning(&self, message: &str, site: CallSite) {
        self.log(LogKind::Warning, message, site);
    }

    /// Write an `ERRR` entry.
    pub fn error(&self, message: &str, site: CallSite) {
        self.log(LogKind::Error, message, site);
    }

    /// Log a success entry when `condition` holds, an error entry otherwise.
    pub fn log_assert(&self, condition: bool, message: &str, site: CallSite) {
        let kind = if condition {
            LogKind::Success
        } else {
            LogKind::Error
        };
        self.log(kind, message, site);
    }
}
