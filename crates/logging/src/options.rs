//! crates/logging/src/options.rs
//! Construction-time options passed through to the logger.

use std::fmt;
use std::io;
use std::sync::Arc;

use logging_sink::Sink;

use crate::entry::Entry;
use crate::field::Field;
use crate::level::Level;

/// Callback run after every entry the logger writes.
///
/// A hook returning an error does not affect the caller; the error is written
/// to the logger's error output.
#[derive(Clone)]
pub struct Hook(Arc<dyn Fn(&Entry<'_>) -> io::Result<()> + Send + Sync>);

impl Hook {
    /// Wraps a callback.
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&Entry<'_>) -> io::Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(hook))
    }

    pub(crate) fn call(&self, entry: &Entry<'_>) -> io::Result<()> {
        (self.0)(entry)
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}

/// What a fatal entry does once it has been written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FatalAction {
    /// Exit the process with status 1.
    #[default]
    Exit,
    /// Panic with the message, like a panic-level entry.
    Panic,
}

/// One construction option.
///
/// Options are applied in order; a later option of the same kind replaces an
/// earlier one, except [`Fields`](Self::Fields) and [`Hooks`](Self::Hooks)
/// which accumulate.
#[derive(Clone, Debug)]
pub enum LoggerOption {
    /// Annotate entries with the caller's `file:line`.
    WithCaller(bool),
    /// Attach a backtrace to entries at or above the level.
    AddStacktrace(Level),
    /// Bind fields to every entry.
    Fields(Vec<Field>),
    /// Register hooks.
    Hooks(Vec<Hook>),
    /// Destination for the logger's own errors.
    ErrorOutput(Sink),
    /// Behaviour after a fatal entry is written.
    OnFatal(FatalAction),
}

impl LoggerOption {
    /// Shorthand for `WithCaller(true)`.
    #[must_use]
    pub const fn add_caller() -> Self {
        Self::WithCaller(true)
    }

    /// Shorthand for a single hook.
    pub fn hook<F>(hook: F) -> Self
    where
        F: Fn(&Entry<'_>) -> io::Result<()> + Send + Sync + 'static,
    {
        Self::Hooks(vec![Hook::new(hook)])
    }
}

/// Options after every [`LoggerOption`] has been applied.
#[derive(Clone, Debug)]
pub(crate) struct Options {
    pub(crate) add_caller: bool,
    pub(crate) stacktrace_level: Option<Level>,
    pub(crate) fields: Vec<Field>,
    pub(crate) hooks: Vec<Hook>,
    pub(crate) error_output: Sink,
    pub(crate) on_fatal: FatalAction,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            add_caller: false,
            stacktrace_level: None,
            fields: Vec::new(),
            hooks: Vec::new(),
            error_output: Sink::stderr(),
            on_fatal: FatalAction::Exit,
        }
    }
}

impl Options {
    pub(crate) fn apply<I>(options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        let mut resolved = Self::default();
        for option in options {
            match option {
                LoggerOption::WithCaller(enabled) => resolved.add_caller = enabled,
                LoggerOption::AddStacktrace(level) => resolved.stacktrace_level = Some(level),
                LoggerOption::Fields(fields) => resolved.fields.extend(fields),
                LoggerOption::Hooks(hooks) => resolved.hooks.extend(hooks),
                LoggerOption::ErrorOutput(sink) => resolved.error_output = sink,
                LoggerOption::OnFatal(action) => resolved.on_fatal = action,
            }
        }
        resolved
    }

    pub(crate) fn wants_stacktrace(&self, level: Level) -> bool {
        self.stacktrace_level.is_some_and(|threshold| level.passes(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_quiet() {
        let options = Options::apply([]);
        assert!(!options.add_caller);
        assert!(options.stacktrace_level.is_none());
        assert!(options.fields.is_empty());
        assert!(options.hooks.is_empty());
        assert_eq!(options.on_fatal, FatalAction::Exit);
        assert_eq!(options.error_output.kind(), &logging_sink::SinkKind::Stderr);
    }

    #[test]
    fn later_toggles_win_and_collections_accumulate() {
        let options = Options::apply([
            LoggerOption::add_caller(),
            LoggerOption::Fields(vec![Field::int("a", 1)]),
            LoggerOption::WithCaller(false),
            LoggerOption::Fields(vec![Field::int("b", 2)]),
            LoggerOption::hook(|_| Ok(())),
            LoggerOption::hook(|_| Ok(())),
            LoggerOption::OnFatal(FatalAction::Panic),
        ]);
        assert!(!options.add_caller);
        assert_eq!(options.fields.len(), 2);
        assert_eq!(options.hooks.len(), 2);
        assert_eq!(options.on_fatal, FatalAction::Panic);
    }

    #[test]
    fn stacktrace_threshold_is_inclusive() {
        let options = Options::apply([LoggerOption::AddStacktrace(Level::Error)]);
        assert!(!options.wants_stacktrace(Level::Warn));
        assert!(options.wants_stacktrace(Level::Error));
        assert!(options.wants_stacktrace(Level::Fatal));
        assert!(!Options::apply([]).wants_stacktrace(Level::Fatal));
    }
}
