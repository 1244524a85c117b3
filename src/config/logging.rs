//! Leveled logger sinks for the MFA server
//!
//! Four sinks (Debug, Info, Warning, Error) share one destination. Selecting a
//! level activates that sink and every less verbose one; the rest discard.
//! The Error sink is active under every level.

use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::Local;

use crate::common::{open_append, ConfigError, Result};

/// Log verbosity, ordered from least to most verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Every level, least verbose first
    pub const ALL: [LogLevel; 4] = [Self::Error, Self::Warning, Self::Info, Self::Debug];

    /// Token used in the configuration document
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidLogLevel(s.to_string()))
    }
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// One leveled sink, either bound to a destination or discarding
pub struct LevelLogger {
    level: LogLevel,
    writer: Option<SharedWriter>,
}

impl LevelLogger {
    fn discard(level: LogLevel) -> Self {
        Self { level, writer: None }
    }

    /// Whether lines written here reach the destination
    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }

    /// Write one line tagged with the caller's location
    #[track_caller]
    pub fn log(&self, args: fmt::Arguments<'_>) {
        let caller = Location::caller();
        self.write_line(caller.file(), caller.line(), args);
    }

    fn write_line(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        let Some(writer) = &self.writer else {
            return;
        };
        let file = Path::new(file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(file);
        let now = Local::now().format("%Y/%m/%d %H:%M:%S");

        if let Ok(mut out) = writer.lock() {
            let _ = writeln!(out, "{}: {} {}:{}: {}", self.level, now, file, line, args);
        }
    }

    fn flush(&self) {
        if let Some(writer) = &self.writer {
            if let Ok(mut out) = writer.lock() {
                let _ = out.flush();
            }
        }
    }
}

impl fmt::Debug for LevelLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelLogger")
            .field("level", &self.level)
            .field("active", &self.is_active())
            .finish()
    }
}

/// The four leveled sinks of an MFA server
#[derive(Debug)]
pub struct Loggers {
    level: Option<LogLevel>,
    debug: LevelLogger,
    info: LevelLogger,
    warning: LevelLogger,
    error: LevelLogger,
}

impl Default for Loggers {
    fn default() -> Self {
        Self::discard()
    }
}

impl Loggers {
    /// All four sinks discarding
    pub fn discard() -> Self {
        Self {
            level: None,
            debug: LevelLogger::discard(LogLevel::Debug),
            info: LevelLogger::discard(LogLevel::Info),
            warning: LevelLogger::discard(LogLevel::Warning),
            error: LevelLogger::discard(LogLevel::Error),
        }
    }

    /// Bind the sinks enabled by `level` to `writer`
    pub fn with_writer(level: LogLevel, writer: Box<dyn Write + Send>) -> Self {
        let shared: SharedWriter = Arc::new(Mutex::new(writer));
        let bind = |sink: LogLevel| LevelLogger {
            level: sink,
            writer: (sink <= level).then(|| Arc::clone(&shared)),
        };

        Self {
            level: Some(level),
            debug: bind(LogLevel::Debug),
            info: bind(LogLevel::Info),
            warning: bind(LogLevel::Warning),
            error: bind(LogLevel::Error),
        }
    }

    /// Open `destination` for appending (stdout when `None`) and bind the sinks
    pub fn open(destination: Option<&Path>, level: LogLevel) -> Result<Self> {
        let writer: Box<dyn Write + Send> = match destination {
            Some(path) => Box::new(open_append(path)?),
            None => Box::new(io::stdout()),
        };
        Ok(Self::with_writer(level, writer))
    }

    /// Level the sinks were bound for, `None` while discarding
    pub fn level(&self) -> Option<LogLevel> {
        self.level
    }

    /// Sink for `level`
    pub fn sink(&self, level: LogLevel) -> &LevelLogger {
        match level {
            LogLevel::Debug => &self.debug,
            LogLevel::Info => &self.info,
            LogLevel::Warning => &self.warning,
            LogLevel::Error => &self.error,
        }
    }

    pub fn debug(&self) -> &LevelLogger {
        &self.debug
    }

    pub fn info(&self) -> &LevelLogger {
        &self.info
    }

    pub fn warning(&self) -> &LevelLogger {
        &self.warning
    }

    pub fn error(&self) -> &LevelLogger {
        &self.error
    }
}

fn sink_level(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warning,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug | log::Level::Trace => LogLevel::Debug,
    }
}

/// Lets a server install its configured sinks behind the `log` macros
impl log::Log for Loggers {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.sink(sink_level(metadata.level())).is_active()
    }

    fn log(&self, record: &log::Record<'_>) {
        self.sink(sink_level(record.level())).write_line(
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            *record.args(),
        );
    }

    fn flush(&self) {
        self.error.flush();
    }
}
