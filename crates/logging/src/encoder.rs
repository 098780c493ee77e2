//! crates/logging/src/encoder.rs
//! Console encoder: renders one tab-separated line per entry.
//!
//! The encoder is installed as the `fmt` layer's event formatter inside the
//! logger's private dispatch. It reads the fields the engine attached to the
//! event (severity, logger name, caller, function, message, JSON context,
//! stacktrace) and lays them out as
//!
//! ```text
//! <ts>\t<level>\t<name>\t<caller>\t<function>\t<message>\t<{fields}>
//! <stacktrace>
//! ```
//!
//! Columns whose key is configured empty, or whose value is absent, are
//! skipped entirely.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::level::Level;

/// ISO-8601 timestamp with millisecond precision and numeric UTC offset.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Key under which the facade records the emitting function.
pub const FUNCTION_KEY: &str = "F";

/// How the level column is spelled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LevelEncoder {
    /// `info`, `warn`, ...
    #[default]
    Lowercase,
    /// `INFO`, `WARN`, ...
    Capital,
}

impl LevelEncoder {
    const fn encode(self, level: Level) -> &'static str {
        match self {
            Self::Lowercase => level.as_str(),
            Self::Capital => level.capital(),
        }
    }
}

/// Keys and formats used by the console encoder.
///
/// The console layout is positional, so a key only decides whether its column
/// is present: an empty key drops the column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Timestamp column.
    pub time_key: String,
    /// Severity column.
    pub level_key: String,
    /// Logger name column.
    pub name_key: String,
    /// Caller `file:line` column.
    pub caller_key: String,
    /// Emitting function column.
    pub function_key: String,
    /// Message column.
    pub message_key: String,
    /// Trailing stacktrace block.
    pub stacktrace_key: String,
    /// Level spelling.
    pub level_encoder: LevelEncoder,
    /// `chrono` format string for timestamps.
    pub time_format: String,
}

impl EncoderConfig {
    /// Production defaults: every column except the function, lowercase levels,
    /// ISO-8601 timestamps.
    #[must_use]
    pub fn production() -> Self {
        Self {
            time_key: "ts".to_owned(),
            level_key: "level".to_owned(),
            name_key: "logger".to_owned(),
            caller_key: "caller".to_owned(),
            function_key: String::new(),
            message_key: "msg".to_owned(),
            stacktrace_key: "stacktrace".to_owned(),
            level_encoder: LevelEncoder::Lowercase,
            time_format: ISO8601_FORMAT.to_owned(),
        }
    }

    /// Sets the function column key.
    pub fn with_function_key(mut self, key: impl Into<String>) -> Self {
        self.function_key = key.into();
        self
    }

    /// Sets the level spelling.
    pub const fn with_level_encoder(mut self, level_encoder: LevelEncoder) -> Self {
        self.level_encoder = level_encoder;
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::production().with_function_key(FUNCTION_KEY)
    }
}

/// Parts of one entry recovered from the event's fields.
#[derive(Debug, Default)]
pub(crate) struct EncodedEntry {
    pub(crate) level: Option<Level>,
    pub(crate) name: Option<String>,
    pub(crate) caller: Option<String>,
    pub(crate) function: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) fields: Option<String>,
    pub(crate) stacktrace: Option<String>,
}

impl Visit for EncodedEntry {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "severity" {
            self.level = u8::try_from(value).ok().map(Level::from_u8);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "logger" => &mut self.name,
            "caller" => &mut self.caller,
            "function" => &mut self.function,
            "message" => &mut self.message,
            "fields" => &mut self.fields,
            "stacktrace" => &mut self.stacktrace,
            _ => return,
        };
        *slot = Some(value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" && self.message.is_none() {
            self.message = Some(format!("{value:?}"));
        }
    }
}

/// Maps a foreign `tracing` level onto the facade's levels.
const fn level_from_tracing(level: tracing::Level) -> Level {
    match level {
        tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
        tracing::Level::INFO => Level::Info,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::ERROR => Level::Error,
    }
}

/// `FormatEvent` implementation producing the console layout.
pub(crate) struct ConsoleEncoder {
    config: EncoderConfig,
    timer: ChronoLocal,
}

impl ConsoleEncoder {
    pub(crate) fn new(config: EncoderConfig) -> Self {
        let timer = ChronoLocal::new(config.time_format.clone());
        Self { config, timer }
    }

    /// Writes every column after the timestamp, then the line ending.
    pub(crate) fn write_body(
        &self,
        out: &mut dyn fmt::Write,
        entry: &EncodedEntry,
        written: usize,
    ) -> fmt::Result {
        let config = &self.config;
        let mut columns = Columns { written };

        let level = entry.level.unwrap_or(Level::Debug);
        columns.push(out, &config.level_key, Some(config.level_encoder.encode(level)))?;
        columns.push(out, &config.name_key, entry.name.as_deref())?;
        columns.push(out, &config.caller_key, entry.caller.as_deref())?;
        columns.push(out, &config.function_key, entry.function.as_deref())?;
        columns.push(out, &config.message_key, Some(entry.message.as_deref().unwrap_or("")))?;
        columns.push(out, "fields", entry.fields.as_deref())?;
        out.write_char('\n')?;

        if let Some(stacktrace) = entry.stacktrace.as_deref() {
            if !config.stacktrace_key.is_empty() {
                out.write_str(stacktrace.trim_end())?;
                out.write_char('\n')?;
            }
        }
        Ok(())
    }
}

/// Tab-separated column writer.
struct Columns {
    written: usize,
}

impl Columns {
    fn push(&mut self, out: &mut dyn fmt::Write, key: &str, value: Option<&str>) -> fmt::Result {
        let Some(value) = value else {
            return Ok(());
        };
        if key.is_empty() {
            return Ok(());
        }
        if self.written > 0 {
            out.write_char('\t')?;
        }
        self.written += 1;
        out.write_str(value)
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleEncoder
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut entry = EncodedEntry::default();
        event.record(&mut entry);
        if entry.level.is_none() {
            entry.level = Some(level_from_tracing(*event.metadata().level()));
        }

        let mut columns = 0;
        if !self.config.time_key.is_empty() {
            self.timer.format_time(&mut writer)?;
            columns += 1;
        }
        self.write_body(&mut writer, &entry, columns)
    }
}
