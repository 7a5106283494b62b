//! Structured logging infrastructure for kindred.
//!
//! This module provides a configurable logging system based on the tracing crate,
//! supporting different output formats, log levels and an optional log file.
//! `RUST_LOG`, when set, takes precedence over the configured level.

#[cfg(test)]
mod tests;

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

/// Keeps the file writer's worker thread alive for the life of the process
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Error type for logging operations
#[derive(Debug)]
pub enum LogError {
    /// IO error occurred
    IoError(std::io::Error),

    /// Error parsing log level
    InvalidLogLevel(String),

    /// Error in subscriber setup
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),

    /// General error
    Other(String),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LogError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LogError::SubscriberError(err)
    }
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Console stream used when `LoggingConfig::stdout` is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Console {
    #[default]
    Stdout,
    Stderr,
}

/// Applies the shared subscriber settings and installs it with the given writer.
macro_rules! install_subscriber {
    ($builder:expr, $writer:expr, $ansi:expr) => {{
        $builder
            .with_level(true)
            .with_target(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_ansi($ansi)
            .with_writer($writer)
            .try_init()
    }};
}

/// Initialize the logging system with the given configuration.
///
/// Console output goes to stdout. Does nothing if a global subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    init_with_console(config, Console::Stdout)
}

/// Initialize the logging system, sending console output to `console`.
pub fn init_with_console(config: &LoggingConfig, console: Console) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
    let writer = create_writer(config, console)?;
    // Escape codes would end up in the log file
    let ansi = config.file.is_none();

    let result = match config.format {
        LogFormat::Json => install_subscriber!(
            tracing_subscriber::fmt().json().with_env_filter(filter),
            writer,
            ansi
        ),
        LogFormat::Compact => install_subscriber!(
            tracing_subscriber::fmt().compact().with_env_filter(filter),
            writer,
            ansi
        ),
        LogFormat::Pretty => install_subscriber!(
            tracing_subscriber::fmt().pretty().with_env_filter(filter),
            writer,
            ansi
        ),
        LogFormat::Default => install_subscriber!(
            tracing_subscriber::fmt().with_env_filter(filter),
            writer,
            ansi
        ),
    };

    result.map_err(LogError::from)
}

/// Combine the console stream and the log file as configured.
fn create_writer(config: &LoggingConfig, console: Console) -> Result<BoxMakeWriter> {
    let writer = match (&config.file, config.stdout, console) {
        (Some(path), true, Console::Stdout) => {
            BoxMakeWriter::new(std::io::stdout.and(create_non_blocking_file(path)?))
        }
        (Some(path), true, Console::Stderr) => {
            BoxMakeWriter::new(std::io::stderr.and(create_non_blocking_file(path)?))
        }
        (Some(path), false, _) => BoxMakeWriter::new(create_non_blocking_file(path)?),
        (None, true, Console::Stdout) => BoxMakeWriter::new(std::io::stdout),
        (None, true, Console::Stderr) => BoxMakeWriter::new(std::io::stderr),
        (None, false, _) => BoxMakeWriter::new(std::io::sink),
    };
    Ok(writer)
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<NonBlocking> {
    let (writer, guard) = open_non_blocking_file(path)?;
    if FILE_GUARD.set(guard).is_err() {
        return Err(LogError::Other(
            "file logging has already been initialized".to_string(),
        ));
    }
    Ok(writer)
}

fn open_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| LogError::Other(format!("Invalid log file path: {}", path.display())))?;

    let file_appender = tracing_appender::rolling::never(
        path.parent().unwrap_or_else(|| Path::new(".")),
        file_name,
    );

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level.parse().map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

/// Convert a LogLevel to a tracing::Level.
pub fn log_level_to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::IoError(e) => write!(f, "IO error: {}", e),
            LogError::SubscriberError(e) => write!(f, "Subscriber error: {}", e),
            LogError::InvalidLogLevel(s) => write!(f, "Invalid log level: {}", s),
            LogError::Other(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for LogError {}
