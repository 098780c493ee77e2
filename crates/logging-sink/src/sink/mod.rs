//! crates/logging-sink/src/sink/mod.rs
//! Shared, lock-guarded output sink.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::syncer::WriteSyncer;

mod constructors;
mod writing;

/// Describes where a [`Sink`] sends its bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SinkKind {
    /// The process's standard error stream.
    Stderr,
    /// The process's standard output stream.
    Stdout,
    /// A file opened in append mode.
    File(PathBuf),
    /// An in-memory [`SharedBuffer`](crate::SharedBuffer).
    Buffer,
    /// Any other writer supplied by the caller.
    Writer,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Buffer => f.write_str("buffer"),
            Self::Writer => f.write_str("writer"),
        }
    }
}

/// Cloneable handle to a mutex-guarded [`WriteSyncer`].
///
/// All clones write into the same destination. The handle is what the logger
/// engine holds on to, so replacing a logger never closes a sink another logger
/// still uses.
///
/// # Examples
///
/// ```
/// use logging_sink::{Sink, SinkKind};
///
/// let sink = Sink::default();
/// assert_eq!(sink.kind(), &SinkKind::Stderr);
/// ```
#[derive(Clone)]
pub struct Sink {
    writer: Arc<Mutex<Box<dyn WriteSyncer>>>,
    kind: SinkKind,
}

impl Sink {
    pub(crate) fn from_parts(writer: Box<dyn WriteSyncer>, kind: SinkKind) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            kind,
        }
    }

    /// Returns the destination this sink writes to.
    #[must_use]
    pub const fn kind(&self) -> &SinkKind {
        &self.kind
    }

    /// Reports whether `self` and `other` share the same underlying writer.
    #[must_use]
    pub fn same_destination(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn WriteSyncer>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("kind", &format_args!("{}", self.kind))
            .finish()
    }
}
