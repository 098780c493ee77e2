//! crates/logging/src/entry.rs
//! Borrowed view of an entry as handed to hooks.

use std::fmt;
use std::panic::Location;

use crate::level::Level;

/// Source location of the code that issued a log call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    file: &'static str,
    line: u32,
}

impl Caller {
    /// Captures the location of the nearest `#[track_caller]` boundary.
    #[track_caller]
    #[must_use]
    pub fn capture() -> Self {
        Self::from(Location::caller())
    }

    /// Full source path as reported by the compiler.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// The last two path segments, e.g. `src/server.rs`.
    #[must_use]
    pub fn short_file(&self) -> &'static str {
        let mut separators = self
            .file
            .char_indices()
            .rev()
            .filter(|(_, c)| matches!(c, '/' | '\\'));
        separators.next();
        match separators.next() {
            Some((idx, _)) => &self.file[idx + 1..],
            None => self.file,
        }
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.short_file(), self.line)
    }
}

/// An entry that passed the level gate and was handed to the engine.
#[derive(Clone, Debug)]
pub struct Entry<'a> {
    /// Severity.
    pub level: Level,
    /// Dotted logger name, when the logger was named.
    pub logger_name: Option<&'a str>,
    /// Rendered message body.
    pub message: &'a str,
    /// Call site, when caller annotation is enabled.
    pub caller: Option<Caller>,
    /// Emitting function or module, when the call came through a `log_*!` macro.
    pub function: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_file_keeps_last_two_segments() {
        let caller = Caller {
            file: "crates/logging/src/logger/mod.rs",
            line: 12,
        };
        assert_eq!(caller.short_file(), "logger/mod.rs");
        assert_eq!(caller.to_string(), "logger/mod.rs:12");
    }

    #[test]
    fn short_file_handles_shallow_and_windows_paths() {
        let shallow = Caller { file: "main.rs", line: 1 };
        assert_eq!(shallow.short_file(), "main.rs");

        let one_dir = Caller { file: "src/main.rs", line: 1 };
        assert_eq!(one_dir.short_file(), "src/main.rs");

        let windows = Caller {
            file: r"C:\work\src\lib.rs",
            line: 9,
        };
        assert_eq!(windows.short_file(), r"src\lib.rs");
    }

    #[test]
    fn capture_records_this_file() {
        let caller = Caller::capture();
        assert!(caller.file().ends_with("entry.rs"));
        assert!(caller.line() > 0);
    }
}
