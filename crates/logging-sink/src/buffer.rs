//! crates/logging-sink/src/buffer.rs
//! In-memory sink target shared between a logger and its observer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::syncer::WriteSyncer;

/// Growable byte buffer whose clones all append to the same storage.
///
/// The buffer is the in-memory target returned by
/// [`Sink::buffer`](crate::Sink::buffer). One clone is handed to the sink while
/// the caller keeps another to inspect what was written.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use logging_sink::SharedBuffer;
///
/// let buffer = SharedBuffer::new();
/// let mut writer = buffer.clone();
/// writer.write_all(b"one\ntwo\n")?;
///
/// assert_eq!(buffer.lines(), vec!["one", "two"]);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the raw bytes written so far.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Returns the contents decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns the contents split into lines without their terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes and returns every byte written so far.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.lock())
    }

    /// Discards the contents.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl WriteSyncer for SharedBuffer {}
