//! Logging abstraction
//!
//! Drivers never log through global state. Each one is handed a logging
//! capability at construction and writes through it with the `log_*!`
//! macros:
//!
//! - [`FacadeLogger`]: forwards to the `log` crate facade (target `servo_pwm`)
//! - [`StderrLogger`]: prints `[LEVEL] message` lines, used by `servo_pwmctl`
//! - [`MemoryLogger`]: records entries for inspection in tests
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use servo_pwm::{log_info, LogLevel, MemoryLogger, SharedLogger};
//!
//! let memory = Arc::new(MemoryLogger::new());
//! let logger: SharedLogger = memory.clone();
//! log_info!(logger, "Servo syspath: {}", "/sys/class/pwm/pwmchip1");
//! assert!(memory.contains(LogLevel::Info, "pwmchip1"));
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG]",
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

/// Logging sink injected into drivers
///
/// Implementations must not panic and must not block for long; drivers log
/// from inside their write paths.
pub trait Logger: Send + Sync {
    /// Record one formatted message at `level`.
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>);
}

/// Shared logging handle held by drivers
pub type SharedLogger = Arc<dyn Logger>;

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        (**self).log(level, args)
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        (**self).log(level, args)
    }
}

/// Forwards to whatever `log` backend the host application installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeLogger;

impl Logger for FacadeLogger {
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        log::log!(target: "servo_pwm", log::Level::from(level), "{}", args);
    }
}

/// Writes `[LEVEL] message` lines to stderr.
#[derive(Debug, Clone, Copy)]
pub struct StderrLogger {
    max_level: LogLevel,
}

impl StderrLogger {
    pub fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if level <= self.max_level {
            eprintln!("{} {}", level.tag(), args);
        }
    }
}

/// A single recorded log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries recorded so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// True if an entry at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lock()
            .iter()
            .any(|e| e.level == level && e.message.contains(needle))
    }

    /// Number of entries recorded at `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.lock().iter().filter(|e| e.level == level).count()
    }

    /// Number of entries at `level` containing `needle`.
    pub fn count_containing(&self, level: LogLevel, needle: &str) -> usize {
        self.lock()
            .iter()
            .filter(|e| e.level == level && e.message.contains(needle))
            .count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        // A panicking test thread must not hide the entries from the others
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.lock().push(LogEntry {
            level,
            message: args.to_string(),
        });
    }
}

/// Log informational message through a [`Logger`] handle
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::core::logging::Logger::log(
            &$logger,
            $crate::core::logging::LogLevel::Info,
            format_args!($($arg)*),
        )
    };
}

/// Log warning message through a [`Logger`] handle
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::core::logging::Logger::log(
            &$logger,
            $crate::core::logging::LogLevel::Warn,
            format_args!($($arg)*),
        )
    };
}

/// Log error message through a [`Logger`] handle
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::core::logging::Logger::log(
            &$logger,
            $crate::core::logging::LogLevel::Error,
            format_args!($($arg)*),
        )
    };
}

/// Log debug message through a [`Logger`] handle
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::core::logging::Logger::log(
            &$logger,
            $crate::core::logging::LogLevel::Debug,
            format_args!($($arg)*),
        )
    };
}
