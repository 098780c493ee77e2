//! crates/logging/src/global.rs
//! Process-wide default logger and the package-level helpers that use it.
//!
//! The default starts as an info-level logger on standard error. It lives in
//! an [`ArcSwap`], so [`replace_default`] never blocks concurrent log calls:
//! a call already holding the previous logger finishes on it.

use std::fmt;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::error::Result;
use crate::level::Level;
use crate::logger::Logger;

static DEFAULT: LazyLock<ArcSwap<Logger>> =
    LazyLock::new(|| ArcSwap::from_pointee(Logger::stderr(Level::Info, [])));

/// The current process-wide logger.
#[must_use]
pub fn default() -> Arc<Logger> {
    DEFAULT.load_full()
}

/// Installs `logger` as the process-wide default and returns the previous one.
pub fn replace_default(logger: Logger) -> Arc<Logger> {
    DEFAULT.swap(Arc::new(logger))
}

/// Changes the default logger's threshold.
pub fn set_level(level: Level) {
    DEFAULT.load().set_level(level);
}

/// The default logger's threshold.
#[must_use]
pub fn level() -> Level {
    DEFAULT.load().level()
}

/// Flushes the default logger's sink.
pub fn sync() -> Result<()> {
    DEFAULT.load().sync()
}

/// Logs `values` at debug level on the default logger.
#[track_caller]
pub fn debug(values: &[&dyn fmt::Display]) {
    DEFAULT.load().debug(values);
}

/// Logs `values` at info level on the default logger.
#[track_caller]
pub fn info(values: &[&dyn fmt::Display]) {
    DEFAULT.load().info(values);
}

/// Logs `values` at warn level on the default logger.
#[track_caller]
pub fn warn(values: &[&dyn fmt::Display]) {
    DEFAULT.load().warn(values);
}

/// Logs `values` at error level on the default logger.
#[track_caller]
pub fn error(values: &[&dyn fmt::Display]) {
    DEFAULT.load().error(values);
}

/// Logs `values` at panic level on the default logger, then panics.
#[track_caller]
pub fn panic(values: &[&dyn fmt::Display]) -> ! {
    default().panic(values)
}

/// Logs `values` at fatal level on the default logger, then exits.
#[track_caller]
pub fn fatal(values: &[&dyn fmt::Display]) -> ! {
    default().fatal(values)
}

/// Logs formatted arguments at debug level on the default logger.
#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    DEFAULT.load().debugf(args);
}

/// Logs formatted arguments at info level on the default logger.
#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    DEFAULT.load().infof(args);
}

/// Logs formatted arguments at warn level on the default logger.
#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    DEFAULT.load().warnf(args);
}

/// Logs formatted arguments at error level on the default logger.
#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    DEFAULT.load().errorf(args);
}

/// Logs formatted arguments at panic level on the default logger, then panics.
#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    default().panicf(args)
}

/// Logs formatted arguments at fatal level on the default logger, then exits.
#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    default().fatalf(args)
}
