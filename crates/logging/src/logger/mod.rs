//! crates/logging/src/logger/mod.rs
//! The level-gated logger and its construction.

use std::fmt;
use std::sync::Arc;

use logging_sink::Sink;

use crate::encoder::EncoderConfig;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::level::{AtomicLevel, Level, LevelGuard};
use crate::options::{LoggerOption, Options};

mod emission;

/// Logger gated by a single mutable severity threshold.
///
/// A logger owns one engine (console encoder writing into one [`Sink`]) and
/// one [`AtomicLevel`]. Every logger derived from it through
/// [`with`](Self::with) or [`named`](Self::named) shares both, so
/// [`set_level`](Self::set_level) always applies to all of them at once.
///
/// Three call styles reach the same engine:
///
/// - plain: [`info`](Self::info) joins displayable values with spaces;
/// - formatted: [`infof`](Self::infof) takes [`format_args!`] output, and the
///   [`log_info!`](crate::log_info) family of macros builds it for you;
/// - structured: [`info_fields`](Self::info_fields) and [`log`](Self::log)
///   attach typed [`Field`]s.
///
/// # Examples
///
/// ```
/// use logging::{Level, Logger, Sink};
///
/// let (sink, buffer) = Sink::buffer();
/// let logger = Logger::new(sink, Level::Warn, []);
///
/// logger.info(&[&"x"]);
/// logger.error(&[&"y"]);
///
/// let lines = buffer.lines();
/// assert_eq!(lines.len(), 1);
/// assert!(lines[0].ends_with("error\ty"));
/// ```
#[derive(Clone)]
pub struct Logger {
    engine: Arc<Engine>,
    level: AtomicLevel,
    options: Arc<Options>,
    name: Option<Arc<str>>,
    fields: Arc<[Field]>,
}

impl Logger {
    /// Builds a logger writing to `sink` with the default console encoder
    /// (ISO-8601 timestamps, function column keyed `F`).
    pub fn new<I>(sink: Sink, level: Level, options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        Self::with_encoder(sink, level, EncoderConfig::default(), options)
    }

    /// Builds a logger writing to standard error.
    pub fn stderr<I>(level: Level, options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        Self::new(Sink::stderr(), level, options)
    }

    /// Builds a logger with a custom encoder configuration.
    pub fn with_encoder<I>(sink: Sink, level: Level, encoder: EncoderConfig, options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        let mut options = Options::apply(options);
        let fields = std::mem::take(&mut options.fields);
        Self {
            engine: Arc::new(Engine::new(sink, encoder)),
            level: AtomicLevel::new(level),
            options: Arc::new(options),
            name: None,
            fields: fields.into(),
        }
    }

    /// Current threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level.level()
    }

    /// Changes the threshold for this logger and every logger sharing its engine.
    pub fn set_level(&self, level: Level) {
        self.level.set_level(level);
    }

    /// Overrides the threshold until the returned guard is dropped.
    pub fn scoped_level(&self, level: Level) -> LevelGuard {
        self.level.scoped(level)
    }

    /// Shared threshold handle.
    #[must_use]
    pub const fn level_handle(&self) -> &AtomicLevel {
        &self.level
    }

    /// Reports whether an entry at `level` would be written.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    /// Returns a child logger that adds `fields` to every entry.
    #[must_use]
    pub fn with<I>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        let mut combined = self.fields.to_vec();
        combined.extend(fields);
        Self {
            fields: combined.into(),
            ..self.clone()
        }
    }

    /// Returns a child logger whose name is `name` appended to this logger's,
    /// separated by a dot.
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        let name = match (self.name.as_deref(), name) {
            (current, "") => current.map(Arc::from),
            (None, name) => Some(Arc::from(name)),
            (Some(current), name) => Some(Arc::from(format!("{current}.{name}"))),
        };
        Self {
            name,
            ..self.clone()
        }
    }

    /// Dotted logger name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields bound to every entry.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The sink entries are written to.
    #[must_use]
    pub fn sink(&self) -> &Sink {
        self.engine.sink()
    }

    /// Flushes buffered entries to the sink.
    ///
    /// Call before the process exits; entries held in a buffered sink are lost
    /// otherwise.
    pub fn sync(&self) -> Result<()> {
        self.engine.sync().map_err(Error::Sync)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("name", &self.name)
            .field("sink", self.engine.sink())
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}
