//! crates/logging/src/config.rs
//! Declarative logger configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use logging_sink::Sink;

use crate::error::{Error, Result};
use crate::field::Field;
use crate::level::Level;
use crate::logger::Logger;
use crate::options::LoggerOption;

/// Where a configured logger writes its entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Output {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
    /// A file opened for appending, created if missing.
    File(PathBuf),
}

/// Everything needed to build a [`Logger`] without code.
///
/// With the `serde` feature enabled every field is optional when
/// deserializing; missing fields take their [`Default`] value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Initial threshold.
    pub level: Level,
    /// Entry destination.
    pub output: Output,
    /// Annotate entries with the caller's `file:line`.
    pub add_caller: bool,
    /// Attach backtraces at or above this level.
    pub stacktrace_level: Option<Level>,
    /// Logger name.
    pub name: Option<String>,
    /// String fields bound to every entry.
    pub fields: BTreeMap<String, String>,
}

impl LoggerConfig {
    /// Opens the output and builds the logger.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] when a file output cannot be opened.
    pub fn build(&self) -> Result<Logger> {
        let sink = match &self.output {
            Output::Stderr => Sink::stderr(),
            Output::Stdout => Sink::stdout(),
            Output::File(path) => Sink::file(path).map_err(|source| Error::Open {
                path: path.clone(),
                source,
            })?,
        };

        let mut options = vec![LoggerOption::WithCaller(self.add_caller)];
        if let Some(level) = self.stacktrace_level {
            options.push(LoggerOption::AddStacktrace(level));
        }
        if !self.fields.is_empty() {
            let fields = self
                .fields
                .iter()
                .map(|(key, value)| Field::string(key.clone(), value.as_str()))
                .collect();
            options.push(LoggerOption::Fields(fields));
        }

        let logger = Logger::new(sink, self.level, options);
        Ok(match self.name.as_deref() {
            Some(name) => logger.named(name),
            None => logger,
        })
    }
}
