//! crates/logging-sink/src/syncer.rs
//! Writers that know how to persist what they buffered.

use std::fs::File;
use std::io::{self, BufWriter, Stderr, Stdout, Write};

/// A writer that can be synced after a batch of log entries.
///
/// [`sync`](Self::sync) defaults to [`Write::flush`]. Implementors backed by
/// durable storage override it to also persist the data.
pub trait WriteSyncer: Write + Send + 'static {
    /// Flushes buffered bytes and persists them where the target supports it.
    fn sync(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl WriteSyncer for Stderr {}

impl WriteSyncer for Stdout {}

impl WriteSyncer for Vec<u8> {}

impl WriteSyncer for File {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_data()
    }
}

impl<W: WriteSyncer> WriteSyncer for BufWriter<W> {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()?;
        self.get_mut().sync()
    }
}

/// Adapts a plain [`Write`] implementor into a [`WriteSyncer`] whose sync is a flush.
#[derive(Debug)]
pub struct AddSync<W>(W);

impl<W> AddSync<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self(writer)
    }

    /// Consumes the adapter and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> Write for AddSync<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: Write + Send + 'static> WriteSyncer for AddSync<W> {}
