//! crates/logging/src/engine.rs
//! Adapter between the facade and the `tracing` emission engine.
//!
//! Each [`Engine`] owns a private [`Dispatch`] built from a
//! `tracing_subscriber` registry and an `fmt` layer whose event formatter is
//! the [`ConsoleEncoder`] and whose writer is the logger's [`Sink`]. Entries are
//! emitted as `tracing` events inside [`dispatcher::with_default`], so the
//! engine never touches the global subscriber a host application may have
//! installed.

use std::io;

use logging_sink::Sink;
use tracing::Dispatch;
use tracing::dispatcher;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use crate::encoder::{ConsoleEncoder, EncoderConfig};
use crate::level::Level;

/// Target attached to every event the engine emits.
pub(crate) const TARGET: &str = "logging";

/// Everything the encoder needs to render one entry.
#[derive(Debug)]
pub(crate) struct Record<'a> {
    pub(crate) level: Level,
    pub(crate) name: Option<&'a str>,
    pub(crate) caller: Option<String>,
    pub(crate) function: Option<&'a str>,
    pub(crate) message: &'a str,
    pub(crate) fields: Option<String>,
    pub(crate) stacktrace: Option<String>,
}

/// Hands out clones of the sink to the `fmt` layer, one per event.
struct SinkWriter(Sink);

impl<'a> MakeWriter<'a> for SinkWriter {
    type Writer = Sink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0.clone()
    }
}

/// Encoder, sink and dispatch wired together at construction time.
pub(crate) struct Engine {
    dispatch: Dispatch,
    sink: Sink,
}

impl Engine {
    pub(crate) fn new(sink: Sink, encoder: EncoderConfig) -> Self {
        let layer = tracing_subscriber::fmt::layer()
            .event_format(ConsoleEncoder::new(encoder))
            .with_writer(SinkWriter(sink.clone()));
        let subscriber = tracing_subscriber::registry().with(layer);
        Self {
            dispatch: Dispatch::new(subscriber),
            sink,
        }
    }

    /// Encodes `record` and writes it to the sink.
    ///
    /// The record already passed the logger's threshold. Every event is
    /// emitted at `ERROR` so `tracing`'s compile-time `max_level_*` features
    /// cannot drop it; the encoder takes the level from `severity`.
    pub(crate) fn write(&self, record: &Record<'_>) {
        dispatcher::with_default(&self.dispatch, || {
            tracing::event!(
                target: TARGET,
                tracing::Level::ERROR,
                severity = record.level as u8,
                logger = record.name,
                caller = record.caller.as_deref(),
                function = record.function,
                fields = record.fields.as_deref(),
                stacktrace = record.stacktrace.as_deref(),
                message = record.message
            );
        });
    }

    pub(crate) fn sync(&self) -> io::Result<()> {
        self.sink.sync()
    }

    pub(crate) const fn sink(&self) -> &Sink {
        &self.sink
    }
}
