//! Integration tests for the terminal levels.
//!
//! Panic-level calls unwind with the message as a `String` payload and
//! fatal-level calls exit the process with status 1. Both always terminate,
//! even when the threshold filters the entry itself. Exit behaviour is
//! checked by re-running this test binary as a child process.

use std::env;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::process::Command;

use logging::{FatalAction, Field, Level, Logger, LoggerOption, SharedBuffer, Sink};

const CHILD_ENV: &str = "LOGGING_FATAL_CHILD";
const LOG_PATH_ENV: &str = "LOGGING_FATAL_LOG";

fn buffered(level: Level) -> (Logger, SharedBuffer) {
    let (sink, buffer) = Sink::buffer();
    (Logger::new(sink, level, []), buffer)
}

fn panic_payload(run: impl FnOnce()) -> String {
    let payload = catch_unwind(AssertUnwindSafe(run)).expect_err("call unwinds");
    payload
        .downcast_ref::<String>()
        .cloned()
        .expect("String payload")
}

// ============================================================================
// Panic Level
// ============================================================================

/// Verifies panic writes the entry and unwinds with the message.
#[test]
fn panic_writes_then_unwinds() {
    let (logger, buffer) = buffered(Level::Info);

    let message = panic_payload(|| logger.panic(&[&"invariant", &"broken"]));

    assert_eq!(message, "invariant broken");
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("panic\tinvariant broken"));
}

/// Verifies panic unwinds even when the threshold filters the entry.
#[test]
fn panic_terminates_when_filtered() {
    let (logger, buffer) = buffered(Level::Fatal);

    let message = panic_payload(|| logger.panicf(format_args!("gated {}", 1)));

    assert_eq!(message, "gated 1");
    assert!(buffer.is_empty());
}

/// Verifies structured panic keeps its fields in the entry.
#[test]
fn panic_fields_records_context() {
    let (logger, buffer) = buffered(Level::Debug);

    let message = panic_payload(|| logger.panic_fields("corrupt", &[Field::uint("block", 9)]));

    assert_eq!(message, "corrupt");
    assert!(buffer.contents().contains("panic\tcorrupt\t{\"block\":9}"));
}

/// Verifies the generic entry point terminates for panic level.
#[test]
fn log_at_panic_level_unwinds() {
    let (logger, _buffer) = buffered(Level::Info);
    let message = panic_payload(|| logger.log(Level::Panic, "via log", &[]));
    assert_eq!(message, "via log");
}

/// Verifies a panicking logger stays usable after the unwind is caught.
#[test]
fn logger_survives_caught_panic() {
    let (logger, buffer) = buffered(Level::Info);
    let _ = panic_payload(|| logger.panic(&[&"once"]));

    logger.info(&[&"after"]);
    assert_eq!(buffer.lines().len(), 2);
}

// ============================================================================
// Fatal Level
// ============================================================================

/// Verifies fatal panics instead of exiting when configured to.
#[test]
fn fatal_can_panic_instead_of_exiting() {
    let (sink, buffer) = Sink::buffer();
    let logger = Logger::new(sink, Level::Info, [LoggerOption::OnFatal(FatalAction::Panic)]);

    let message = panic_payload(|| logger.fatal_fields("shutting down", &[]));

    assert_eq!(message, "shutting down");
    assert!(buffer.lines()[0].ends_with("fatal\tshutting down"));
}

/// Child half of `fatal_exits_with_status_one`; a no-op in a normal run.
#[test]
fn fatal_child_process() {
    if env::var_os(CHILD_ENV).is_none() {
        return;
    }
    let logger = Logger::stderr(Level::Info, []);
    logger.fatal(&[&"disk", &"gone"]);
}

/// Child half of `fatal_flushes_buffered_sink_before_exit`; a no-op in a normal run.
#[test]
fn buffered_fatal_child_process() {
    let Some(path) = env::var_os(LOG_PATH_ENV) else {
        return;
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .expect("open child log");
    let logger = Logger::new(Sink::buffered(file, 64 * 1024), Level::Info, []);
    logger.info(&[&"last words"]);
    logger.fatalf(format_args!("exit code {}", 1));
}

fn child(test: &str) -> Command {
    let exe = env::current_exe().expect("test binary path");
    let mut command = Command::new(exe);
    command
        .args(["--exact", test, "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1");
    command
}

/// Verifies fatal writes the entry to stderr and exits with status 1.
#[test]
fn fatal_exits_with_status_one() {
    if env::var_os(CHILD_ENV).is_some() {
        return;
    }
    let output = child("fatal_child_process").output().expect("child runs");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fatal\tdisk gone"), "child stderr: {stderr}");
}

/// Verifies fatal syncs a buffered sink before the process exits.
#[test]
fn fatal_flushes_buffered_sink_before_exit() {
    if env::var_os(CHILD_ENV).is_some() {
        return;
    }
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fatal.log");

    let output = child("buffered_fatal_child_process")
        .env(LOG_PATH_ENV, &path)
        .output()
        .expect("child runs");

    assert_eq!(output.status.code(), Some(1));
    let written = std::fs::read_to_string(&path).expect("child log");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2, "child log: {written:?}");
    assert!(lines[0].ends_with("info\tlast words"));
    assert!(lines[1].ends_with("fatal\texit code 1"));
}
