use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::{Sink, SinkKind};
use crate::buffer::SharedBuffer;
use crate::syncer::{AddSync, WriteSyncer};

impl Sink {
    /// Wraps a [`WriteSyncer`] whose own `sync` should run on [`Sink::sync`].
    #[must_use]
    pub fn new<W: WriteSyncer>(writer: W) -> Self {
        Self::from_parts(Box::new(writer), SinkKind::Writer)
    }

    /// Wraps a plain writer; syncing the sink flushes it.
    #[must_use]
    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self::new(AddSync::new(writer))
    }

    /// Sink over the process's standard error stream.
    #[must_use]
    pub fn stderr() -> Self {
        Self::from_parts(Box::new(io::stderr()), SinkKind::Stderr)
    }

    /// Sink over the process's standard output stream.
    #[must_use]
    pub fn stdout() -> Self {
        Self::from_parts(Box::new(io::stdout()), SinkKind::Stdout)
    }

    /// Opens `path` for appending, creating it when missing.
    pub fn file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_parts(
            Box::new(file),
            SinkKind::File(path.to_path_buf()),
        ))
    }

    /// Wraps `writer` in a [`BufWriter`] of the given capacity.
    ///
    /// Entries stay in memory until the buffer fills or [`Sink::sync`] runs.
    #[must_use]
    pub fn buffered<W: WriteSyncer>(writer: W, capacity: usize) -> Self {
        Self::new(BufWriter::with_capacity(capacity, writer))
    }

    /// Creates a sink over a fresh [`SharedBuffer`] and returns both.
    #[must_use]
    pub fn buffer() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let sink = Self::from_parts(Box::new(buffer.clone()), SinkKind::Buffer);
        (sink, buffer)
    }
}
