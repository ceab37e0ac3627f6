use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::env_source::{EnvSource, SystemEnv};

/// Configuration for application logging
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub log_level: String,
    pub app_log_file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Load logging configuration from `LOG_LEVEL` and `APP_LOG_FILE`
    pub fn from_source(env: &dyn EnvSource) -> Self {
        let log_level = env
            .var("LOG_LEVEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        let app_log_file = env
            .var("APP_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            log_level,
            app_log_file,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("File system error: {0}")]
    FileSystemError(#[from] std::io::Error),
}

/// Initialize the tracing subscriber with console and optional file output
/// Reads configuration from environment variables automatically
pub fn init_logging() -> Result<(), LoggingError> {
    init_logging_with(&LoggingConfig::from_source(&SystemEnv))
}

fn env_filter(log_level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(log_level)
        .map_err(|e| LoggingError::InvalidLogLevel(format!("{}: {}", log_level, e)))
}

pub fn init_logging_with(config: &LoggingConfig) -> Result<(), LoggingError> {

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter(&config.log_level)?);

    let subscriber = tracing_subscriber::registry().with(console_layer);

    let Some(log_file_path) = &config.app_log_file else {
        return subscriber
            .try_init()
            .map_err(|e| LoggingError::InitializationError(e.to_string()));
    };

    let directory = log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    std::fs::create_dir_all(directory)?;

    let file_name = log_file_path
        .file_name()
        .ok_or_else(|| LoggingError::InitializationError("Invalid log file path".to_string()))?;

    // Daily rotation, plain text
    let file_appender = tracing_appender::rolling::daily(directory, file_name);
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter(&config.log_level)?);

    subscriber
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::InitializationError(e.to_string()))
}
