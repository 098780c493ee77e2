use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::panic::Location;

use super::Logger;
use crate::engine::Record;
use crate::entry::{Caller, Entry};
use crate::field::{Field, encode_fields};
use crate::level::Level;
use crate::options::FatalAction;

/// Joins values the way `println` joins its operands: one space between each.
fn join_values(values: &[&dyn fmt::Display]) -> String {
    let mut out = String::new();
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{value}");
    }
    out
}

fn render_args(args: fmt::Arguments<'_>) -> Cow<'static, str> {
    match args.as_str() {
        Some(text) => Cow::Borrowed(text),
        None => Cow::Owned(args.to_string()),
    }
}

impl Logger {
    /// Logs `message` with `fields` at `level`.
    ///
    /// Panic and fatal levels end control flow exactly as
    /// [`panic_fields`](Self::panic_fields) and [`fatal_fields`](Self::fatal_fields) do.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        if level.is_terminal() {
            self.terminate(level, message.to_owned(), fields, None);
        }
        if self.enabled(level) {
            self.write(level, message, fields, None, Location::caller());
        }
    }

    /// Logs pre-built format arguments at `level`, recording `function` in the
    /// function column.
    ///
    /// This is the entry point of the `log_*!` macros, which pass
    /// `module_path!()` as the function.
    #[track_caller]
    pub fn log_args(&self, level: Level, args: fmt::Arguments<'_>, function: Option<&str>) {
        if level.is_terminal() {
            self.terminate(level, render_args(args).into_owned(), &[], function);
        }
        if self.enabled(level) {
            self.write(level, &render_args(args), &[], function, Location::caller());
        }
    }

    #[doc(hidden)]
    #[track_caller]
    pub fn __terminate_args(&self, level: Level, args: fmt::Arguments<'_>, function: &str) -> ! {
        self.terminate(level, render_args(args).into_owned(), &[], Some(function))
    }

    #[track_caller]
    fn log_values(&self, level: Level, values: &[&dyn fmt::Display]) {
        if self.enabled(level) {
            self.write(level, &join_values(values), &[], None, Location::caller());
        }
    }

    /// Writes the entry if enabled, syncs, then panics or exits.
    #[track_caller]
    fn terminate(
        &self,
        level: Level,
        message: String,
        fields: &[Field],
        function: Option<&str>,
    ) -> ! {
        if self.enabled(level) {
            self.write(level, &message, fields, function, Location::caller());
        }
        if let Err(err) = self.engine.sync() {
            self.report(format_args!("failed to sync before {level}: {err}"));
        }
        match (level, self.options.on_fatal) {
            (Level::Fatal, FatalAction::Exit) => std::process::exit(1),
            _ => std::panic::panic_any(message),
        }
    }

    fn write(
        &self,
        level: Level,
        message: &str,
        fields: &[Field],
        function: Option<&str>,
        location: &'static Location<'static>,
    ) {
        let caller = self.options.add_caller.then(|| Caller::from(location));
        let stacktrace = self
            .options
            .wants_stacktrace(level)
            .then(|| Backtrace::force_capture().to_string());
        let record = Record {
            level,
            name: self.name.as_deref(),
            caller: caller.map(|caller| caller.to_string()),
            function,
            message,
            fields: encode_fields(self.fields.iter().chain(fields)),
            stacktrace,
        };
        self.engine.write(&record);

        if self.options.hooks.is_empty() {
            return;
        }
        let entry = Entry {
            level,
            logger_name: record.name,
            message,
            caller,
            function,
        };
        for hook in &self.options.hooks {
            if let Err(err) = hook.call(&entry) {
                self.report(format_args!("hook failed: {err}"));
            }
        }
    }

    /// Writes one of the logger's own errors to the error output.
    fn report(&self, args: fmt::Arguments<'_>) {
        let line = format!("logging: {args}\n");
        let _ = self.options.error_output.write_entry(line.as_bytes());
    }

    /// Logs `values` at debug level.
    #[track_caller]
    pub fn debug(&self, values: &[&dyn fmt::Display]) {
        self.log_values(Level::Debug, values);
    }

    /// Logs `values` at info level.
    #[track_caller]
    pub fn info(&self, values: &[&dyn fmt::Display]) {
        self.log_values(Level::Info, values);
    }

    /// Logs `values` at warn level.
    #[track_caller]
    pub fn warn(&self, values: &[&dyn fmt::Display]) {
        self.log_values(Level::Warn, values);
    }

    /// Logs `values` at error level.
    #[track_caller]
    pub fn error(&self, values: &[&dyn fmt::Display]) {
        self.log_values(Level::Error, values);
    }

    /// Logs `values` at panic level, then panics with the joined message.
    #[track_caller]
    pub fn panic(&self, values: &[&dyn fmt::Display]) -> ! {
        self.terminate(Level::Panic, join_values(values), &[], None)
    }

    /// Logs `values` at fatal level, then exits the process with status 1.
    #[track_caller]
    pub fn fatal(&self, values: &[&dyn fmt::Display]) -> ! {
        self.terminate(Level::Fatal, join_values(values), &[], None)
    }

    /// Logs formatted arguments at debug level.
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_args(Level::Debug, args, None);
    }

    /// Logs formatted arguments at info level.
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_args(Level::Info, args, None);
    }

    /// Logs formatted arguments at warn level.
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log_args(Level::Warn, args, None);
    }

    /// Logs formatted arguments at error level.
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_args(Level::Error, args, None);
    }

    /// Logs formatted arguments at panic level, then panics with the message.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.terminate(Level::Panic, render_args(args).into_owned(), &[], None)
    }

    /// Logs formatted arguments at fatal level, then exits the process with status 1.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.terminate(Level::Fatal, render_args(args).into_owned(), &[], None)
    }

    /// Logs `message` with `fields` at debug level.
    #[track_caller]
    pub fn debug_fields(&self, message: &str, fields: &[Field]) {
        self.log(Level::Debug, message, fields);
    }

    /// Logs `message` with `fields` at info level.
    #[track_caller]
    pub fn info_fields(&self, message: &str, fields: &[Field]) {
        self.log(Level::Info, message, fields);
    }

    /// Logs `message` with `fields` at warn level.
    #[track_caller]
    pub fn warn_fields(&self, message: &str, fields: &[Field]) {
        self.log(Level::Warn, message, fields);
    }

    /// Logs `message` with `fields` at error level.
    #[track_caller]
    pub fn error_fields(&self, message: &str, fields: &[Field]) {
        self.log(Level::Error, message, fields);
    }

    /// Logs `message` with `fields` at panic level, then panics with `message`.
    #[track_caller]
    pub fn panic_fields(&self, message: &str, fields: &[Field]) -> ! {
        self.terminate(Level::Panic, message.to_owned(), fields, None)
    }

    /// Logs `message` with `fields` at fatal level, then exits the process with status 1.
    #[track_caller]
    pub fn fatal_fields(&self, message: &str, fields: &[Field]) -> ! {
        self.terminate(Level::Fatal, message.to_owned(), fields, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LoggerOption;
    use logging_sink::{SharedBuffer, Sink};
    use std::io;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::{Arc, Mutex};

    fn buffered(level: Level) -> (Logger, SharedBuffer) {
        let (sink, buffer) = Sink::buffer();
        (Logger::new(sink, level, []), buffer)
    }

    fn body(line: &str) -> &str {
        line.split_once('\t').map_or(line, |(_, rest)| rest)
    }

    #[test]
    fn join_values_separates_with_single_spaces() {
        assert_eq!(join_values(&[]), "");
        assert_eq!(join_values(&[&"a"]), "a");
        assert_eq!(join_values(&[&"count", &5, &true]), "count 5 true");
    }

    #[test]
    fn static_arguments_are_borrowed() {
        assert!(matches!(render_args(format_args!("static")), Cow::Borrowed("static")));
        let n = 2;
        assert_eq!(render_args(format_args!("n={n}")), "n=2");
    }

    #[test]
    fn structured_fields_merge_with_bound_fields() {
        let (logger, buffer) = buffered(Level::Debug);
        let logger = logger.with([Field::string("svc", "api")]);
        logger.info_fields("started", &[Field::uint("port", 8080)]);

        assert_eq!(
            body(&buffer.lines()[0]),
            r#"info	started	{"port":8080,"svc":"api"}"#
        );
    }

    #[test]
    fn disabled_levels_skip_hooks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let (sink, buffer) = Sink::buffer();
        let logger = Logger::new(
            sink,
            Level::Info,
            [LoggerOption::hook(move |entry| {
                recorder
                    .lock()
                    .expect("hook lock")
                    .push((entry.level, entry.message.to_owned()));
                Ok(())
            })],
        );

        logger.debug(&[&"hidden"]);
        logger.warn(&[&"shown"]);

        assert_eq!(buffer.lines().len(), 1);
        assert_eq!(
            *seen.lock().expect("hook lock"),
            vec![(Level::Warn, "shown".to_owned())]
        );
    }

    #[test]
    fn hook_errors_go_to_error_output() {
        let (sink, buffer) = Sink::buffer();
        let (errors, error_buffer) = Sink::buffer();
        let logger = Logger::new(
            sink,
            Level::Info,
            [
                LoggerOption::ErrorOutput(errors),
                LoggerOption::hook(|_| Err(io::Error::other("hook broke"))),
            ],
        );

        logger.info(&[&"still written"]);

        assert!(buffer.contents().contains("still written"));
        assert_eq!(error_buffer.lines(), vec!["logging: hook failed: hook broke"]);
    }

    #[test]
    fn caller_points_at_the_call_site() {
        let (sink, buffer) = Sink::buffer();
        let logger = Logger::new(sink, Level::Info, [LoggerOption::add_caller()]);
        let line = line!() + 1;
        logger.info(&[&"here"]);

        let expected = format!("logger/emission.rs:{line}\there");
        assert!(buffer.lines()[0].ends_with(&expected), "{}", buffer.contents());
    }

    #[test]
    fn stacktrace_is_attached_at_threshold() {
        let (sink, buffer) = Sink::buffer();
        let logger = Logger::new(sink, Level::Info, [LoggerOption::AddStacktrace(Level::Error)]);

        logger.warn(&[&"no trace"]);
        assert_eq!(buffer.lines().len(), 1);

        buffer.clear();
        logger.error(&[&"with trace"]);
        assert!(buffer.lines().len() > 1, "{}", buffer.contents());
    }

    #[test]
    fn panic_below_threshold_still_panics_without_writing() {
        let (logger, buffer) = buffered(Level::Fatal);
        let payload = catch_unwind(AssertUnwindSafe(|| logger.panic(&[&"quiet"])))
            .expect_err("panic level unwinds");

        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("quiet"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn fatal_can_be_configured_to_panic() {
        let (sink, buffer) = Sink::buffer();
        let logger = Logger::new(
            sink,
            Level::Info,
            [LoggerOption::OnFatal(crate::FatalAction::Panic)],
        );
        let payload = catch_unwind(AssertUnwindSafe(|| logger.fatalf(format_args!("code {}", 9))))
            .expect_err("fatal panics instead of exiting");

        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("code 9"));
        assert!(buffer.lines()[0].ends_with("fatal\tcode 9"));
    }

    #[test]
    fn generic_log_dispatches_by_level() {
        let (logger, buffer) = buffered(Level::Info);
        logger.log(Level::Debug, "dropped", &[]);
        logger.log(Level::Error, "kept", &[Field::bool("retry", false)]);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(body(&lines[0]), r#"error	kept	{"retry":false}"#);
    }
}
