//! crates/logging/src/error.rs
//! Error type surfaced by the logger facade.

use std::io;
use std::path::PathBuf;

/// Errors returned by logger construction, level parsing, and [`sync`](crate::Logger::sync).
///
/// Emitting an entry never fails from the caller's point of view; only the
/// operations listed on each variant report errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The sink could not flush or persist buffered entries.
    #[error("failed to sync log sink: {0}")]
    Sync(#[source] io::Error),

    /// A level name was not one of `debug`, `info`, `warn`, `error`, `panic`, `fatal`.
    #[error("unrecognized log level: {0:?}")]
    ParseLevel(String),

    /// A file output named in a [`LoggerConfig`](crate::LoggerConfig) could not be opened.
    #[error("failed to open log output {}: {source}", .path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Result alias for fallible logger operations.
pub type Result<T> = std::result::Result<T, Error>;
