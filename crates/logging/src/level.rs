//! crates/logging/src/level.rs
//! Severity levels and the shared, atomically updated threshold.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::Error;

/// Severity of a log entry, ordered from least to most severe.
///
/// An entry at level `L` passes a threshold `T` iff `L >= T`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Level {
    /// Verbose diagnostics, usually disabled in production.
    Debug = 0,
    /// Routine operational messages.
    #[default]
    Info = 1,
    /// Something unexpected that the program recovered from.
    Warn = 2,
    /// A failure the caller should look at.
    Error = 3,
    /// Logs the message, then panics with it.
    Panic = 4,
    /// Logs the message, then terminates the process.
    Fatal = 5,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Self; 6] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Panic,
        Self::Fatal,
    ];

    /// Lowercase label used by the console encoder.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// Uppercase label.
    #[must_use]
    pub const fn capital(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Panic => "PANIC",
            Self::Fatal => "FATAL",
        }
    }

    /// Reports whether entries at this level end normal control flow.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Panic | Self::Fatal)
    }

    /// Reports whether an entry at `self` passes `threshold`.
    #[must_use]
    pub const fn passes(self, threshold: Self) -> bool {
        self as u8 >= threshold as u8
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warn,
            3 => Self::Error,
            4 => Self::Panic,
            _ => Self::Fatal,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "panic" => Ok(Self::Panic),
            "fatal" => Ok(Self::Fatal),
            _ => Err(Error::ParseLevel(s.to_owned())),
        }
    }
}

/// Shared severity threshold that can be changed while loggers are in use.
///
/// Clones observe and update the same value. Every logger derived from one
/// constructor call holds a clone of the same handle.
///
/// # Examples
///
/// ```
/// use logging::{AtomicLevel, Level};
///
/// let level = AtomicLevel::new(Level::Info);
/// let shared = level.clone();
/// shared.set_level(Level::Error);
///
/// assert_eq!(level.level(), Level::Error);
/// assert!(!level.enabled(Level::Warn));
/// ```
#[derive(Clone, Debug)]
pub struct AtomicLevel {
    value: Arc<AtomicU8>,
}

impl AtomicLevel {
    /// Creates a threshold starting at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            value: Arc::new(AtomicU8::new(level as u8)),
        }
    }

    /// Current threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_u8(self.value.load(Ordering::Relaxed))
    }

    /// Replaces the threshold.
    pub fn set_level(&self, level: Level) {
        self.value.store(level as u8, Ordering::Relaxed);
    }

    /// Reports whether entries at `level` pass the current threshold.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level.passes(self.level())
    }

    /// Overrides the threshold until the returned guard is dropped.
    pub fn scoped(&self, level: Level) -> LevelGuard {
        let previous = Level::from_u8(self.value.swap(level as u8, Ordering::Relaxed));
        LevelGuard {
            level: self.clone(),
            previous,
        }
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl From<Level> for AtomicLevel {
    fn from(level: Level) -> Self {
        Self::new(level)
    }
}

/// RAII guard that restores a temporarily overridden threshold.
///
/// Created by [`AtomicLevel::scoped`] and
/// [`Logger::scoped_level`](crate::Logger::scoped_level). Changes made through
/// other handles while the guard is alive are overwritten when it drops.
#[must_use = "dropping the guard immediately restores the previous level"]
#[derive(Debug)]
pub struct LevelGuard {
    level: AtomicLevel,
    previous: Level,
}

impl LevelGuard {
    /// The threshold that will be restored on drop.
    #[must_use]
    pub const fn previous_level(&self) -> Level {
        self.previous
    }
}

impl Drop for LevelGuard {
    fn drop(&mut self) {
        self.level.set_level(self.previous);
    }
}
