// tools/log/src/lib.rs
// Leveled logging for host build tools
// ============================================================================
// Copyright (c) 2025 Cartesian School - Siergej Sobolewski
// SPDX-License-Identifier: BSD-3-Clause

//! Host-side counterpart of `kernel_log`.
//!
//! Same level set and `[LEVEL][subsystem] message` record prefix. The
//! recursion guard is per thread, and records go straight to a sink callback
//! instead of a ring buffer. The default sink is standard error: build tools keep
//! standard output for the artifact they generate.

use std::cell::Cell;
use std::fmt;
use std::fmt::Write;
use std::io::Write as _;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;

thread_local! {
    // Recursion protection: set while this thread is inside the sink
    static LOGGING_ACTIVE: Cell<bool> = const { Cell::new(false) };
}

pub const DEFAULT_LEVEL: LogLevel = LogLevel::Warn;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    #[must_use]
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone)]
pub struct LoggerCallbacks {
    pub sink: fn(&str),
}

impl LoggerCallbacks {
    pub const fn new(sink: fn(&str)) -> Self {
        Self { sink }
    }

    #[must_use]
    pub const fn default() -> Self {
        Self {
            sink: default_sink,
        }
    }
}

pub fn default_sink(line: &str) {
    // Nothing sensible to do if stderr is gone
    let _ = std::io::stderr().lock().write_all(line.as_bytes());
}

// --------------------------------------------------------------------------
// Public API
// --------------------------------------------------------------------------

pub fn init(level: LogLevel, callbacks: LoggerCallbacks) {
    LOGGER.set_level(level);
    LOGGER.set_callbacks(callbacks);
}

pub fn set_level(level: LogLevel) {
    LOGGER.set_level(level);
}

#[must_use]
pub fn level() -> LogLevel {
    LOGGER.level()
}

pub fn set_callbacks(callbacks: LoggerCallbacks) {
    LOGGER.set_callbacks(callbacks);
}

#[must_use]
pub fn enabled(level: LogLevel) -> bool {
    level >= LOGGER.level()
}

pub fn log(level: LogLevel, subsystem: &'static str, args: fmt::Arguments) {
    LOGGER.record(level, subsystem, args);
}

/// Render one record the way every sink receives it.
#[must_use]
pub fn format_record(level: LogLevel, subsystem: &str, args: fmt::Arguments) -> String {
    let mut line = String::new();
    let _ = write!(line, "[{}][{}] ", level.as_str(), subsystem);
    let _ = line.write_fmt(args);
    line.push('\n');
    line
}

// --------------------------------------------------------------------------
// Macros
// --------------------------------------------------------------------------

#[macro_export]
macro_rules! tlog_trace {
    ($subsystem:expr, $($arg:tt)*) => {
        $crate::log($crate::LogLevel::Trace, $subsystem, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! tlog_debug {
    ($subsystem:expr, $($arg:tt)*) => {
        $crate::log($crate::LogLevel::Debug, $subsystem, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! tlog_info {
    ($subsystem:expr, $($arg:tt)*) => {
        $crate::log($crate::LogLevel::Info, $subsystem, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! tlog_warn {
    ($subsystem:expr, $($arg:tt)*) => {
        $crate::log($crate::LogLevel::Warn, $subsystem, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! tlog_error {
    ($subsystem:expr, $($arg:tt)*) => {
        $crate::log($crate::LogLevel::Error, $subsystem, ::core::format_args!($($arg)*))
    };
}

// --------------------------------------------------------------------------
// Logger core
// --------------------------------------------------------------------------

static LOGGER: Logger = Logger::new();

struct Logger {
    level: AtomicU8,
    callbacks: Mutex<LoggerCallbacks>,
}

impl Logger {
    const fn new() -> Self {
        Self {
            level: AtomicU8::new(DEFAULT_LEVEL as u8),
            callbacks: Mutex::new(LoggerCallbacks::default()),
        }
    }

    fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    fn set_callbacks(&self, callbacks: LoggerCallbacks) {
        match self.callbacks.lock() {
            Ok(mut cb) => *cb = callbacks,
            Err(poisoned) => *poisoned.into_inner() = callbacks,
        }
    }

    fn callbacks(&self) -> LoggerCallbacks {
        match self.callbacks.lock() {
            Ok(cb) => *cb,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn record(&self, level: LogLevel, subsystem: &'static str, args: fmt::Arguments) {
        if level < self.level() {
            return;
        }

        let Some(_active) = ActiveGuard::enter() else {
            // Re-entered from a sink on this thread: bypass the sink entirely
            default_sink(&format_record(level, subsystem, args));
            return;
        };

        let line = format_record(level, subsystem, args);
        (self.callbacks().sink)(&line);
    }
}

/// Holds the per-thread recursion flag; cleared on drop, including when the
/// sink unwinds.
struct ActiveGuard;

impl ActiveGuard {
    fn enter() -> Option<Self> {
        LOGGING_ACTIVE.with(|active| {
            if active.replace(true) {
                None
            } else {
                Some(ActiveGuard)
            }
        })
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        LOGGING_ACTIVE.with(|active| active.set(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic;
    use std::sync::atomic::AtomicBool;
    use std::sync::MutexGuard;
    use std::thread;
    use std::time::Duration;

    // The logger is process-global; tests touching it take this lock.
    static SERIAL: Mutex<()> = Mutex::new(());
    static CAPTURED: Mutex<String> = Mutex::new(String::new());

    fn capture(line: &str) {
        CAPTURED.lock().unwrap().push_str(line);
    }

    fn reentrant(line: &str) {
        capture(line);
        tlog_error!("nested", "should not reach the capture sink");
    }

    static IN_SINK: AtomicBool = AtomicBool::new(false);

    fn slow_capture(line: &str) {
        IN_SINK.store(true, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(200));
        capture(line);
    }

    fn panicking(_line: &str) {
        panic!("sink failure");
    }

    fn serial() -> MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn take_captured() -> String {
        std::mem::take(&mut *CAPTURED.lock().unwrap())
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::from_u8(LogLevel::Info as u8), LogLevel::Info);
        assert_eq!(LogLevel::from_u8(200), LogLevel::Error);
    }

    #[test]
    fn test_format_record() {
        let line = format_record(LogLevel::Info, "vectorgen", format_args!("{} stubs", 256));
        assert_eq!(line, "[INFO][vectorgen] 256 stubs\n");
    }

    #[test]
    fn test_threshold_filters_records() {
        let _guard = serial();
        init(LogLevel::Warn, LoggerCallbacks::new(capture));
        take_captured();

        tlog_debug!("test", "hidden");
        tlog_warn!("test", "shown {}", 1);
        assert_eq!(take_captured(), "[WARN][test] shown 1\n");
        assert!(!enabled(LogLevel::Info));
        assert!(enabled(LogLevel::Error));

        init(DEFAULT_LEVEL, LoggerCallbacks::default());
    }

    #[test]
    fn test_reentrant_sink_does_not_recurse() {
        let _guard = serial();
        init(LogLevel::Trace, LoggerCallbacks::new(reentrant));
        take_captured();

        tlog_info!("outer", "once");
        assert_eq!(take_captured(), "[INFO][outer] once\n");

        init(DEFAULT_LEVEL, LoggerCallbacks::default());
    }

    #[test]
    fn test_set_level_and_callbacks() {
        let _guard = serial();
        set_callbacks(LoggerCallbacks::new(capture));
        set_level(LogLevel::Error);
        take_captured();
        assert_eq!(level(), LogLevel::Error);

        tlog_warn!("test", "filtered");
        assert_eq!(take_captured(), "");

        set_level(LogLevel::Trace);
        assert_eq!(level(), LogLevel::Trace);
        tlog_trace!("test", "kept");
        assert_eq!(take_captured(), "[TRACE][test] kept\n");

        init(DEFAULT_LEVEL, LoggerCallbacks::default());
    }

    #[test]
    fn test_concurrent_records_reach_sink() {
        let _guard = serial();
        init(LogLevel::Info, LoggerCallbacks::new(slow_capture));
        take_captured();
        IN_SINK.store(false, Ordering::SeqCst);

        let first = thread::spawn(|| tlog_info!("a", "first"));
        while !IN_SINK.load(Ordering::SeqCst) {
            thread::yield_now();
        }
        tlog_info!("b", "second");
        first.join().unwrap();

        let captured = take_captured();
        assert!(captured.contains("[INFO][a] first\n"), "{}", captured);
        assert!(captured.contains("[INFO][b] second\n"), "{}", captured);

        init(DEFAULT_LEVEL, LoggerCallbacks::default());
    }

    #[test]
    fn test_panicking_sink_releases_guard() {
        let _guard = serial();
        init(LogLevel::Info, LoggerCallbacks::new(panicking));
        take_captured();

        let result = panic::catch_unwind(|| tlog_info!("test", "lost"));
        assert!(result.is_err());

        set_callbacks(LoggerCallbacks::new(capture));
        tlog_info!("test", "after");
        assert_eq!(take_captured(), "[INFO][test] after\n");

        init(DEFAULT_LEVEL, LoggerCallbacks::default());
    }

    #[test]
    fn test_macros_in_expression_position() {
        let _guard = serial();
        init(LogLevel::Info, LoggerCallbacks::new(capture));
        take_captured();

        let emit = || tlog_info!("expr", "closure");
        emit();
        let outcome: Result<(), ()> = Err(());
        match outcome {
            Ok(()) => tlog_info!("expr", "ok"),
            Err(()) => tlog_warn!("expr", "err"),
        }
        assert_eq!(take_captured(), "[INFO][expr] closure\n[WARN][expr] err\n");

        init(DEFAULT_LEVEL, LoggerCallbacks::default());
    }
}
