use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::logging::{
    level_to_log_level, log_level_to_level, open_non_blocking_file, parse_log_level,
};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_init_console_logging_is_idempotent() {
    let config = LoggingConfig {
        level: LogLevel::Debug,
        format: LogFormat::Compact,
        file: None,
        stdout: true,
    };

    assert!(crate::logging::init(&config).is_ok());
    // A second call finds the global subscriber already installed
    assert!(crate::logging::init(&config).is_ok());
}

#[test]
fn test_file_writer_creates_parent_directories() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("nested").join("kindred.log");

    let (mut writer, guard) = open_non_blocking_file(&log_path).unwrap();
    writer.write_all(b"hello\n").unwrap();
    drop(writer);
    drop(guard);

    assert!(log_path.parent().unwrap().exists());
    assert!(log_path.exists());
}

#[test]
fn test_level_conversion() {
    assert_eq!(parse_log_level("trace").unwrap(), LogLevel::Trace);
    assert_eq!(parse_log_level("DEBUG").unwrap(), LogLevel::Debug);
    assert!(parse_log_level("info").is_ok());
    assert!(parse_log_level("warn").is_ok());
    assert!(parse_log_level("error").is_ok());
    assert!(parse_log_level("invalid").is_err());

    assert_eq!(level_to_log_level(tracing::Level::TRACE), LogLevel::Trace);
    assert_eq!(level_to_log_level(tracing::Level::DEBUG), LogLevel::Debug);
    assert_eq!(level_to_log_level(tracing::Level::INFO), LogLevel::Info);
    assert_eq!(level_to_log_level(tracing::Level::WARN), LogLevel::Warn);
    assert_eq!(level_to_log_level(tracing::Level::ERROR), LogLevel::Error);

    for level in [LogLevel::Trace, LogLevel::Info, LogLevel::Error] {
        assert_eq!(level_to_log_level(log_level_to_level(level)), level);
    }
}
