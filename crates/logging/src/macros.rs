//! crates/logging/src/macros.rs
//! Formatting macros that record the calling module in the function column.
//!
//! Each macro accepts `format!`-style arguments and logs them on the
//! process-wide default logger, or on an explicit logger when the first
//! argument is `logger: <expr>`.

/// Log a formatted debug entry.
///
/// # Example
/// ```
/// logging::log_debug!("cache warm: {} keys", 12);
/// ```
#[macro_export]
macro_rules! log_debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.log_args($crate::Level::Debug, ::std::format_args!($($arg)+), ::std::option::Option::Some(::std::module_path!()))
    };
    ($($arg:tt)+) => {
        $crate::default().log_args($crate::Level::Debug, ::std::format_args!($($arg)+), ::std::option::Option::Some(::std::module_path!()))
    };
}

/// Log a formatted info entry.
///
/// # Example
/// ```
/// use logging::{Level, Logger, Sink};
///
/// let (sink, buffer) = Sink::buffer();
/// let logger = Logger::new(sink, Level::Info, []);
/// logging::log_info!(logger: logger, "listening on {}", 8080);
/// assert!(buffer.contents().contains("listening on 8080"));
/// ```
#[macro_export]
macro_rules! log_info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.log_args($crate::Level::Info, ::std::format_args!($($arg)+), ::std::option::Option::Some(::std::module_path!()))
    };
    ($($arg:tt)+) => {
        $crate::default().log_args($crate::Level::Info, ::std::format_args!($($arg)+), ::std::option::Option::Some(::std::module_path!()))
    };
}

/// Log a formatted warn entry.
#[macro_export]
macro_rules! log_warn {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.log_args($crate::Level::Warn, ::std::format_args!($($arg)+), ::std::option::Option::Some(::std::module_path!()))
    };
    ($($arg:tt)+) => {
        $crate::default().log_args($crate::Level::Warn, ::std::format_args!($($arg)+), ::std::option::Option::Some(::std::module_path!()))
    };
}

/// Log a formatted error entry.
#[macro_export]
macro_rules! log_error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.log_args($crate::Level::Error, ::std::format_args!($($arg)+), ::std::option::Option::Some(::std::module_path!()))
    };
    ($($arg:tt)+) => {
        $crate::default().log_args($crate::Level::Error, ::std::format_args!($($arg)+), ::std::option::Option::Some(::std::module_path!()))
    };
}

/// Log a formatted panic entry, then panic with the message.
#[macro_export]
macro_rules! log_panic {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.__terminate_args($crate::Level::Panic, ::std::format_args!($($arg)+), ::std::module_path!())
    };
    ($($arg:tt)+) => {
        $crate::default().__terminate_args($crate::Level::Panic, ::std::format_args!($($arg)+), ::std::module_path!())
    };
}

/// Log a formatted fatal entry, then exit the process with status 1.
#[macro_export]
macro_rules! log_fatal {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.__terminate_args($crate::Level::Fatal, ::std::format_args!($($arg)+), ::std::module_path!())
    };
    ($($arg:tt)+) => {
        $crate::default().__terminate_args($crate::Level::Fatal, ::std::format_args!($($arg)+), ::std::module_path!())
    };
}

#[cfg(test)]
mod tests {
    use crate::{Level, Logger, Sink};
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn macros_fill_the_function_column() {
        let (sink, buffer) = Sink::buffer();
        let logger = Logger::new(sink, Level::Debug, []);

        log_debug!(logger: logger, "d {}", 1);
        log_warn!(logger: &logger, "w");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("debug\tlogging::macros::tests\td 1"), "{}", lines[0]);
        assert!(lines[1].ends_with("warn\tlogging::macros::tests\tw"), "{}", lines[1]);
    }

    #[test]
    fn panic_macro_carries_the_formatted_message() {
        let (sink, buffer) = Sink::buffer();
        let logger = Logger::new(sink, Level::Info, []);

        let payload = catch_unwind(AssertUnwindSafe(|| {
            log_panic!(logger: logger, "bad state {}", 3);
        }))
        .expect_err("log_panic unwinds");

        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("bad state 3")
        );
        assert!(buffer.contents().contains("panic\tlogging::macros::tests\tbad state 3"));
    }
}
