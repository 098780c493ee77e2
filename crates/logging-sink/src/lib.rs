#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the byte-stream destinations that the `logging`
//! crate writes rendered entries into. A [`Sink`] is a cheaply cloneable,
//! mutex-guarded handle over any [`WriteSyncer`]: the standard streams, files,
//! buffered writers, arbitrary [`std::io::Write`] implementors, or the
//! in-memory [`SharedBuffer`] used by tests.
//!
//! # Design
//!
//! Every clone of a [`Sink`] refers to the same underlying writer. Writes go
//! through [`Sink::write_entry`], which holds the lock for the whole entry so
//! lines produced by concurrent callers never interleave. [`Sink::sync`]
//! flushes buffered bytes and, for files, asks the operating system to persist
//! them.
//!
//! # Invariants
//!
//! - One entry is written with one locked `write_all` call.
//! - A poisoned lock is recovered rather than propagated; a panicking writer
//!   must not silence every later log line.
//! - [`Sink::default`] is standard error.
//!
//! # Errors
//!
//! All operations surface [`std::io::Error`] values originating from the
//! underlying writer unchanged.
//!
//! # Examples
//!
//! ```
//! use logging_sink::Sink;
//!
//! let (sink, buffer) = Sink::buffer();
//! sink.write_entry(b"first\n")?;
//! sink.clone().write_entry(b"second\n")?;
//! sink.sync()?;
//!
//! assert_eq!(buffer.lines(), vec!["first", "second"]);
//! # Ok::<(), std::io::Error>(())
//! ```

mod buffer;
mod sink;
mod syncer;

pub use buffer::SharedBuffer;
pub use sink::{Sink, SinkKind};
pub use syncer::{AddSync, WriteSyncer};
