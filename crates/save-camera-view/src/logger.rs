use tracing::{
    Level,
    subscriber::{SetGlobalDefaultError, set_global_default},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt};

use crate::config_dir;

const LOG_FILE: &str = "save-camera-view.log";

/// Flushes the log writers when dropped, hold until exit.
pub struct LoggerGuards {
    _console: WorkerGuard,
    _file: WorkerGuard,
}

pub fn setup_logger(should_debug: bool) -> Result<LoggerGuards, SetGlobalDefaultError> {
    let level = if should_debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = tracing_subscriber::filter::Targets::new().with_default(level);

    // Console logger, stdout carries the command output
    let (console_writer, console_guard) = tracing_appender::non_blocking(std::io::stderr());
    let console_logger = tracing_subscriber::fmt::layer()
        .with_writer(console_writer)
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE);

    // File logger
    let file_appender = tracing_appender::rolling::daily(config_dir().join("logs"), LOG_FILE);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let file_logger = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE);

    // Register loggers
    let collector = tracing_subscriber::registry()
        .with(console_logger)
        .with(file_logger)
        .with(filter);

    set_global_default(collector)?;

    Ok(LoggerGuards {
        _console: console_guard,
        _file: file_guard,
    })
}
