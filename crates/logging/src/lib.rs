#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is a small leveled logger facade. A [`Logger`] carries one
//! mutable severity threshold and writes human-readable, tab-separated entries
//! to a [`Sink`]. A process-wide default logger, reachable through
//! [`default`] and the package-level helpers ([`info`], [`warnf`], ...), lets
//! code log without threading a logger through every call.
//!
//! # Design
//!
//! Rendering and emission are delegated to `tracing`: each logger owns a
//! private dispatch whose only layer formats events with the console encoder
//! and writes them into the logger's sink. The dispatch is entered per call,
//! so a host application's global subscriber never sees these entries and is
//! never replaced.
//!
//! Severity gating happens in the facade before anything is rendered. The
//! threshold is an [`AtomicLevel`] shared by a logger and every child derived
//! from it with [`Logger::with`] or [`Logger::named`].
//!
//! # Invariants
//!
//! - An entry at level `L` passing threshold `T` is written iff `L >= T`.
//! - Panic-level calls always panic and fatal-level calls always exit with
//!   status 1, whether or not the entry itself was written.
//! - Replacing the default logger is atomic: concurrent callers observe either
//!   the previous logger or the new one.
//!
//! # Errors
//!
//! Emission never fails from the caller's point of view. [`Logger::sync`]
//! reports sink flush failures as [`Error::Sync`], level parsing reports
//! [`Error::ParseLevel`], and [`LoggerConfig::build`] reports
//! [`Error::Open`].
//!
//! # Examples
//!
//! ```
//! use logging::{Field, Level, Logger, Sink};
//!
//! let (sink, buffer) = Sink::buffer();
//! let logger = Logger::new(sink, Level::Info, []).named("worker");
//!
//! logger.debug(&[&"hidden"]);
//! logger.infof(format_args!("processed {} items", 3));
//! logger.warn_fields("slow batch", &[Field::uint("ms", 420)]);
//!
//! let lines = buffer.lines();
//! assert_eq!(lines.len(), 2);
//! assert!(lines[0].ends_with("info\tworker\tprocessed 3 items"));
//! assert!(lines[1].ends_with("warn\tworker\tslow batch\t{\"ms\":420}"));
//! ```
//!
//! # See also
//!
//! - [`logging_sink`] for the destinations entries are written to.

mod config;
mod encoder;
mod engine;
mod entry;
mod error;
mod field;
mod global;
mod level;
mod logger;
mod macros;
mod options;

pub use config::{LoggerConfig, Output};
pub use encoder::{EncoderConfig, FUNCTION_KEY, ISO8601_FORMAT, LevelEncoder};
pub use entry::{Caller, Entry};
pub use error::{Error, Result};
pub use field::{Field, FieldValue};
pub use global::{
    debug, debugf, default, error, errorf, fatal, fatalf, info, infof, level, panic, panicf,
    replace_default, set_level, sync, warn, warnf,
};
pub use level::{AtomicLevel, Level, LevelGuard};
pub use logger::Logger;
pub use logging_sink::{AddSync, SharedBuffer, Sink, SinkKind, WriteSyncer};
pub use options::{FatalAction, Hook, LoggerOption};
