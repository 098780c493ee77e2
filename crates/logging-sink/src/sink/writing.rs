use std::io::{self, Write};

use super::Sink;

impl Sink {
    /// Writes one rendered entry while holding the lock for its full length.
    pub fn write_entry(&self, entry: &[u8]) -> io::Result<()> {
        self.lock().write_all(entry)
    }

    /// Flushes buffered bytes and persists them where the target supports it.
    ///
    /// Must run before the process exits, otherwise entries held by a buffered
    /// writer are lost.
    pub fn sync(&self) -> io::Result<()> {
        self.lock().sync()
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write_entry(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}
